//! Password synthesis.
//!
//! The synthesizer draws every decision from an injected
//! [`EntropySource`](crate::entropy::EntropySource) and accepts only a
//! [`ValidatedPolicy`](crate::policy::ValidatedPolicy), so policy errors
//! can never surface halfway through a password.

mod result;
mod synthesizer;

pub use result::GenerationResult;
pub use synthesizer::{GenerationError, Synthesizer};
