//! Character classes and their composition.
//!
//! The registry owns the canonical built-in pools and applies the two
//! transforms a policy can request: ambiguity filtering, then exclusion.

mod class;
mod registry;

pub use class::{CharacterClass, ClassId};
pub use registry::{
    CharacterRegistry, ClassFilter, RegistryError, AMBIGUOUS_SYMBOLS, DEFAULT_AMBIGUOUS,
    DEFAULT_SYMBOLS, DIGITS, LOWERCASE, UPPERCASE,
};
