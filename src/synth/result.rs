//! Generated passwords.

use crate::policy::ValidatedPolicy;
use crate::strength::Strength;
use std::sync::Arc;

/// A generated password together with the policy it satisfies.
///
/// Immutable once created.
#[derive(Clone)]
pub struct GenerationResult {
    password: String,
    policy: Arc<ValidatedPolicy>,
    strength: Strength,
}

impl GenerationResult {
    pub(crate) fn new(password: String, policy: Arc<ValidatedPolicy>, strength: Strength) -> Self {
        Self {
            password,
            policy,
            strength,
        }
    }

    /// Returns the password.
    #[inline]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the policy the password was generated under.
    #[inline]
    pub fn policy(&self) -> &ValidatedPolicy {
        &self.policy
    }

    /// Returns the policy-based strength estimate.
    #[inline]
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Consumes the result, returning the password.
    pub fn into_password(self) -> String {
        self.password
    }
}

impl std::fmt::Debug for GenerationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationResult")
            .field("length", &self.policy.length())
            .field("strength", &self.strength)
            .finish_non_exhaustive()
    }
}
