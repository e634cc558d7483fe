//! Information-theoretic strength and keyspace.
//!
//! Strength is computed from the policy shape an attacker is assumed to
//! know, never from the characters a particular draw happened to use.

mod analysis;
mod estimator;
mod keyspace;

pub use analysis::{analyze, Analysis, Check};
pub use estimator::{bits_for, estimate, estimate_policy, Rating, Strength};
pub use keyspace::keyspace;
