//! TOML configuration file.
//!
//! Every section is optional; a missing file section falls back to the
//! built-in defaults.

use crate::batch::{DEFAULT_MAX_COUNT, MAX_BATCH};
use crate::charset::{CharacterRegistry, RegistryError, DEFAULT_AMBIGUOUS, DEFAULT_SYMBOLS};
use crate::entropy::DEFAULT_RESEED_INTERVAL;
use crate::output::OutputFormat;
use crate::passphrase::{PassphrasePolicy, MAX_WORDS};
use crate::policy::{LengthLimits, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration loading and validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
    /// The length range is empty or starts at zero.
    #[error("invalid length limits {min}..={max}")]
    InvalidLimits { min: usize, max: usize },
    /// The `charset` section is rejected by the registry.
    #[error("invalid character set: {0}")]
    InvalidCharset(#[from] RegistryError),
    /// A default value is out of range.
    #[error("invalid default: {0}")]
    InvalidDefault(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Length and count bounds.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Symbol and ambiguity sets.
    #[serde(default)]
    pub charset: CharsetConfig,
    /// Defaults for `generate`.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Defaults for `passphrase`.
    #[serde(default)]
    pub passphrase: PassphrasePolicy,
    /// Entropy source settings.
    #[serde(default)]
    pub entropy: EntropyConfig,
}

/// Bounds on what a single invocation may request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Shortest accepted password.
    pub min_length: usize,
    /// Longest accepted password.
    pub max_length: usize,
    /// Most passwords generated per invocation.
    pub max_count: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let length = LengthLimits::default();
        Self {
            min_length: length.min_length,
            max_length: length.max_length,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl LimitsConfig {
    /// The password length range.
    pub fn length(&self) -> LengthLimits {
        LengthLimits {
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }
}

/// Character pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharsetConfig {
    /// The symbol class.
    pub symbols: String,
    /// Glyphs dropped when avoiding ambiguous characters.
    pub ambiguous: String,
}

impl Default for CharsetConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.to_string(),
            ambiguous: DEFAULT_AMBIGUOUS.to_string(),
        }
    }
}

/// Defaults for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Password length when none is given.
    pub length: usize,
    /// Passwords per invocation.
    pub count: usize,
    /// Worker threads for batches without uniqueness.
    pub jobs: usize,
    /// Output rendering.
    pub format: OutputFormat,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            length: 16,
            count: 1,
            jobs: 1,
            format: OutputFormat::Plain,
        }
    }
}

/// Entropy source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    /// Output bytes between CSPRNG reseeds.
    pub reseed_interval_bytes: u64,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            reseed_interval_bytes: DEFAULT_RESEED_INTERVAL,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parses and validates configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let LimitsConfig {
            min_length,
            max_length,
            max_count,
        } = self.limits;
        if min_length == 0 || min_length > max_length {
            return Err(ConfigError::InvalidLimits {
                min: min_length,
                max: max_length,
            });
        }
        if max_count == 0 || max_count > MAX_BATCH {
            return Err(ConfigError::InvalidDefault(format!(
                "limits.max_count must be within 1..={MAX_BATCH}"
            )));
        }

        self.registry()?;

        if self.generate.count == 0 || self.generate.count > max_count {
            return Err(ConfigError::InvalidDefault(format!(
                "generate.count must be within 1..={max_count}"
            )));
        }
        if self.generate.jobs == 0 {
            return Err(ConfigError::InvalidDefault("generate.jobs must be positive".into()));
        }
        if self.passphrase.words == 0 || self.passphrase.words > MAX_WORDS {
            return Err(ConfigError::InvalidDefault(format!(
                "passphrase.words must be within 1..={MAX_WORDS}"
            )));
        }
        Ok(())
    }

    /// Builds the character registry described by the `charset` section.
    pub fn registry(&self) -> Result<CharacterRegistry, ConfigError> {
        Ok(CharacterRegistry::with_sets(
            &self.charset.symbols,
            &self.charset.ambiguous,
        )?)
    }

    /// Builds a policy validator from the registry and limits.
    pub fn validator(&self) -> Result<Validator, ConfigError> {
        Ok(Validator::with_limits(self.registry()?, self.limits.length()))
    }
}
