//! Crate-level error type and process exit codes.

use crate::charset::RegistryError;
use crate::config::ConfigError;
use crate::entropy::EntropyError;
use crate::passphrase::PassphraseError;
use crate::policy::PolicyError;
use crate::synth::GenerationError;
use thiserror::Error;

/// Any failure surfaced by the `passgen` binary.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested policy is unsatisfiable.
    #[error("invalid policy: {0}")]
    Policy(#[from] PolicyError),

    /// Password generation failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Passphrase generation failed.
    #[error("passphrase failed: {0}")]
    Passphrase(#[from] PassphraseError),

    /// The configuration file was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The entropy source failed.
    #[error("entropy failure: {0}")]
    Entropy(#[from] EntropyError),

    /// A character set was rejected.
    #[error("invalid character set: {0}")]
    Registry(#[from] RegistryError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this failure.
    ///
    /// Each policy rejection maps to its own code so scripts can tell
    /// them apart; 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Policy(PolicyError::LengthOutOfRange { .. }) => 3,
            Error::Policy(PolicyError::OverconstrainedPolicy { .. }) => 4,
            Error::Policy(PolicyError::EmptyClassAfterExclusion { .. }) => 5,
            Error::Policy(PolicyError::NoAvailableCharacters) => 6,
            Error::Generation(GenerationError::InsufficientKeyspace { .. }) => 7,
            Error::Generation(GenerationError::CountOutOfRange { .. }) => 11,
            Error::Generation(GenerationError::Entropy(_))
            | Error::Passphrase(PassphraseError::Entropy(_))
            | Error::Entropy(_) => 8,
            Error::Config(_) | Error::Registry(_) => 9,
            Error::Passphrase(PassphraseError::WordCountOutOfRange { .. }) => 10,
            Error::Generation(GenerationError::WorkerPanicked) | Error::Io(_) => 1,
        }
    }
}
