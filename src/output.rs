//! Rendering generated secrets.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a secret is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The secret as-is.
    #[default]
    Plain,
    /// Standard base64 of the UTF-8 bytes.
    Base64,
    /// Lowercase hex of the UTF-8 bytes.
    Hex,
}

/// An unrecognized format name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported output format '{0}' (expected plain, base64 or hex)")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    /// Renders a secret in this format.
    pub fn render(&self, secret: &str) -> String {
        match self {
            OutputFormat::Plain => secret.to_string(),
            OutputFormat::Base64 => general_purpose::STANDARD.encode(secret.as_bytes()),
            OutputFormat::Hex => hex::encode(secret.as_bytes()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "base64" => Ok(OutputFormat::Base64),
            "hex" => Ok(OutputFormat::Hex),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Base64 => "base64",
            OutputFormat::Hex => "hex",
        })
    }
}
