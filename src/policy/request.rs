//! The unvalidated policy value.

use crate::charset::{ClassFilter, ClassId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A class included in a policy, with its minimum count.
///
/// A minimum of zero includes the class in the pool without requiring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSpec {
    /// The class to include.
    pub class: ClassId,
    /// Least number of characters drawn from it.
    #[serde(default)]
    pub min: usize,
}

/// Desired password shape, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Total password length.
    pub length: usize,
    /// Included classes and their minimums.
    pub classes: Vec<ClassSpec>,
    /// Characters of the custom class.
    pub custom: String,
    /// Characters that must never appear.
    pub exclude: BTreeSet<char>,
    /// Drop visually similar glyphs such as `0`/`O` and `1`/`l`/`I`.
    pub avoid_ambiguous: bool,
    /// Drop brackets, quotes and similar punctuation.
    pub avoid_ambiguous_symbols: bool,
}

impl Policy {
    /// Creates an empty policy of the given length.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// All four built-in classes, none of them required.
    pub fn standard(length: usize) -> Self {
        ClassId::BUILTIN
            .into_iter()
            .fold(Self::new(length), |policy, class| policy.include(class))
    }

    /// Includes a class without requiring it.
    pub fn include(self, class: ClassId) -> Self {
        self.require(class, 0)
    }

    /// Includes a class with a minimum count.
    ///
    /// Repeating a class replaces its earlier minimum.
    pub fn require(mut self, class: ClassId, min: usize) -> Self {
        match self.classes.iter_mut().find(|spec| spec.class == class) {
            Some(spec) => spec.min = min,
            None => self.classes.push(ClassSpec { class, min }),
        }
        self
    }

    /// Sets the custom class characters and includes it with a minimum.
    pub fn with_custom(mut self, chars: &str, min: usize) -> Self {
        self.custom = chars.to_string();
        self.require(ClassId::Custom, min)
    }

    /// Adds characters that must never appear.
    pub fn exclude(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.exclude.extend(chars);
        self
    }

    /// Drops visually similar glyphs.
    pub fn avoid_ambiguous(mut self, avoid: bool) -> Self {
        self.avoid_ambiguous = avoid;
        self
    }

    /// Drops brackets, quotes and similar punctuation.
    pub fn avoid_ambiguous_symbols(mut self, avoid: bool) -> Self {
        self.avoid_ambiguous_symbols = avoid;
        self
    }

    /// The character transforms this policy requests.
    pub fn filter(&self) -> ClassFilter {
        ClassFilter {
            avoid_ambiguous: self.avoid_ambiguous,
            avoid_ambiguous_symbols: self.avoid_ambiguous_symbols,
            excluded: self.exclude.clone(),
        }
    }
}
