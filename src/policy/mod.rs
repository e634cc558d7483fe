//! Generation policies.
//!
//! A [`Policy`] is loose input: it can be built in code or deserialized
//! from configuration. The only way to obtain a [`ValidatedPolicy`], which
//! is what synthesis accepts, is through [`Validator::validate`].

mod request;
mod validator;

pub use request::{ClassSpec, Policy};
pub use validator::{
    LengthLimits, PolicyError, PoolChar, ResolvedClass, ValidatedPolicy, Validator,
    DEFAULT_MAX_LENGTH,
};
