//! Hex digests of arbitrary input.

use blake3::Hasher as Blake3Hasher;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256, the default.
    #[default]
    Sha256,
    /// SHA-512.
    Sha512,
    /// BLAKE3 with 32-byte output.
    Blake3,
}

/// An unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported digest algorithm '{0}' (expected sha256, sha512 or blake3)")]
pub struct UnknownAlgorithm(pub String);

impl DigestAlgorithm {
    /// Hashes `input`, returning lowercase hex.
    pub fn digest(&self, input: &[u8]) -> String {
        match self {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
            DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(input)),
            DigestAlgorithm::Blake3 => {
                let mut hasher = Blake3Hasher::new();
                hasher.update(input);
                hasher.finalize().to_hex().to_string()
            }
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha512 => "sha512",
            DigestAlgorithm::Blake3 => "blake3",
        })
    }
}
