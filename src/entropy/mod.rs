//! Cryptographically secure randomness for generation.
//!
//! Every draw the generator makes goes through [`EntropySource`], which
//! turns raw 64-bit output into bias-free bounded indices. The production
//! source is a ChaCha20 CSPRNG seeded from the operating system; it is
//! passed explicitly to the synthesizer rather than reached as a global.

mod csprng;
mod health;
mod shared;
mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use csprng::{OsCsprng, DEFAULT_RESEED_INTERVAL};
pub use health::RepetitionTest;
pub use shared::SharedEntropy;
pub use source::{EntropyError, EntropySource, MAX_REJECTIONS};
