//! Policy validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//! length range, overconstraint, emptied required classes, empty pool.
//! No randomness is consumed here.

use super::Policy;
use crate::charset::{CharacterClass, CharacterRegistry, ClassId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Default maximum password length.
pub const DEFAULT_MAX_LENGTH: usize = 1024;

/// Accepted password length range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthLimits {
    /// Shortest accepted length, never below 1.
    pub min_length: usize,
    /// Longest accepted length.
    pub max_length: usize,
}

impl Default for LengthLimits {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Reasons a policy cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The length is outside the accepted range.
    #[error("length {length} is outside the allowed range {min}..={max}")]
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },

    /// The class minimums need more characters than the length allows.
    #[error("required minimums total {required}, more than the length {length}")]
    OverconstrainedPolicy { required: usize, length: usize },

    /// A required class lost every character to filtering.
    #[error("required class '{class}' has no characters left after filtering")]
    EmptyClassAfterExclusion { class: ClassId },

    /// No class has any character left.
    #[error("no characters are available under this policy")]
    NoAvailableCharacters,
}

/// A class as it survives filtering, with its minimum count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    class: CharacterClass,
    min: usize,
}

impl ResolvedClass {
    /// Which class this is.
    pub fn id(&self) -> ClassId {
        self.class.id()
    }

    /// Available characters of this class.
    pub fn chars(&self) -> &[char] {
        self.class.chars()
    }

    /// Least number of characters drawn from this class.
    pub fn min(&self) -> usize {
        self.min
    }
}

/// A pool character tagged with its originating class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolChar {
    /// The character.
    pub ch: char,
    /// The class that owns it.
    pub class: ClassId,
}

/// A satisfiable, immutable policy.
///
/// Only [`Validator::validate`] constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPolicy {
    length: usize,
    classes: Vec<ResolvedClass>,
    pool: Vec<PoolChar>,
}

impl ValidatedPolicy {
    /// Exact password length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Non-empty classes in canonical order.
    pub fn classes(&self) -> &[ResolvedClass] {
        &self.classes
    }

    /// Classes with a positive minimum.
    pub fn required(&self) -> impl Iterator<Item = &ResolvedClass> {
        self.classes.iter().filter(|class| class.min > 0)
    }

    /// Sum of all class minimums.
    pub fn required_total(&self) -> usize {
        self.classes.iter().map(|class| class.min).sum()
    }

    /// Every available character, each tagged with its class.
    pub fn pool(&self) -> &[PoolChar] {
        &self.pool
    }

    /// Number of distinct available characters.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Returns true if `ch` may appear in output.
    pub fn allows(&self, ch: char) -> bool {
        self.pool.iter().any(|entry| entry.ch == ch)
    }

    /// Returns the class `ch` belongs to under this policy.
    pub fn class_of(&self, ch: char) -> Option<ClassId> {
        self.pool
            .iter()
            .find(|entry| entry.ch == ch)
            .map(|entry| entry.class)
    }
}

/// Turns loose policies into validated ones.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    registry: CharacterRegistry,
    limits: LengthLimits,
}

impl Validator {
    /// Creates a validator over a registry with default length limits.
    pub fn new(registry: CharacterRegistry) -> Self {
        Self {
            registry,
            limits: LengthLimits::default(),
        }
    }

    /// Creates a validator with explicit length limits.
    pub fn with_limits(registry: CharacterRegistry, limits: LengthLimits) -> Self {
        Self { registry, limits }
    }

    /// The registry classes are drawn from.
    pub fn registry(&self) -> &CharacterRegistry {
        &self.registry
    }

    /// The accepted length range.
    pub fn limits(&self) -> LengthLimits {
        self.limits
    }

    /// Validates a policy.
    pub fn validate(&self, policy: &Policy) -> Result<ValidatedPolicy, PolicyError> {
        let length = policy.length;
        let min = self.limits.min_length.max(1);
        if length < min || length > self.limits.max_length {
            return Err(PolicyError::LengthOutOfRange {
                length,
                min,
                max: self.limits.max_length,
            });
        }

        // Merge repeated class entries, keeping the largest minimum.
        let mut minimums: BTreeMap<ClassId, usize> = BTreeMap::new();
        for spec in &policy.classes {
            let entry = minimums.entry(spec.class).or_insert(0);
            *entry = (*entry).max(spec.min);
        }

        let required = minimums
            .values()
            .fold(0usize, |total, &min| total.saturating_add(min));
        if required > length {
            return Err(PolicyError::OverconstrainedPolicy { required, length });
        }

        let filter = policy.filter();
        let mut claimed = BTreeSet::new();
        let mut classes = Vec::with_capacity(minimums.len());

        for (&id, &min) in &minimums {
            let base = match self.registry.class(id) {
                Some(class) => class.clone(),
                None => self.registry.custom(&policy.custom),
            };

            // An earlier class keeps characters shared with a later one.
            let derived = self
                .registry
                .derive(&base, &filter)
                .without(|c| claimed.contains(&c));

            if derived.is_empty() {
                if min > 0 {
                    return Err(PolicyError::EmptyClassAfterExclusion { class: id });
                }
                tracing::debug!(class = %id, "Optional class emptied by filtering");
                continue;
            }

            claimed.extend(derived.chars().iter().copied());
            classes.push(ResolvedClass {
                class: derived,
                min,
            });
        }

        let pool: Vec<PoolChar> = classes
            .iter()
            .flat_map(|resolved| {
                resolved.chars().iter().map(move |&ch| PoolChar {
                    ch,
                    class: resolved.id(),
                })
            })
            .collect();

        if pool.is_empty() {
            return Err(PolicyError::NoAvailableCharacters);
        }

        tracing::debug!(
            length,
            pool_size = pool.len(),
            classes = classes.len(),
            required,
            "Policy validated"
        );

        Ok(ValidatedPolicy {
            length,
            classes,
            pool,
        })
    }
}
