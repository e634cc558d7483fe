//! Secure Password Generation Library
//!
//! Generates passwords and passphrases from a cryptographically secure,
//! OS-seeded entropy source under caller-defined policies.
//!
//! # Architecture
//!
//! ```text
//! Policy → Validator → ValidatedPolicy → Synthesizer → GenerationResult
//!                                            ↑               ↓
//!                                      EntropySource      strength
//! ```
//!
//! # Design Principles
//!
//! - **Parse, don't validate**: synthesis only accepts a [`ValidatedPolicy`]
//! - **No modulo bias**: bounded draws use rejection sampling
//! - **Fail-closed**: entropy failures propagate, never fall back
//! - **Injectable randomness**: every generator takes an [`EntropySource`]
//!
//! # Example
//!
//! ```no_run
//! use passgen::{
//!     charset::ClassId,
//!     entropy::SharedEntropy,
//!     policy::{Policy, Validator},
//!     synth::Synthesizer,
//!     DEFAULT_RESEED_INTERVAL,
//! };
//! use std::sync::Arc;
//!
//! let policy = Policy::new(12)
//!     .require(ClassId::Upper, 2)
//!     .require(ClassId::Digit, 2)
//!     .include(ClassId::Lower);
//! let validated = Arc::new(Validator::default().validate(&policy).unwrap());
//!
//! let entropy = SharedEntropy::from_os_entropy(DEFAULT_RESEED_INTERVAL).unwrap();
//! let mut synth = Synthesizer::new(entropy);
//! let result = synth.synthesize(&validated).unwrap();
//!
//! println!("{} {}", result.password(), result.strength());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod batch;
pub mod charset;
pub mod config;
pub mod digest;
pub mod entropy;
pub mod error;
pub mod output;
pub mod passphrase;
pub mod policy;
pub mod strength;
pub mod synth;

// Re-export commonly used types at crate root
pub use batch::{generate_batch, BatchOrchestrator};
pub use charset::{CharacterClass, CharacterRegistry, ClassId};
pub use config::FileConfig;
pub use entropy::{EntropyError, EntropySource, OsCsprng, SharedEntropy, DEFAULT_RESEED_INTERVAL};
pub use error::Error;
pub use policy::{Policy, PolicyError, ValidatedPolicy, Validator};
pub use strength::{Rating, Strength};
pub use synth::{GenerationError, GenerationResult, Synthesizer};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
