//! Canonical class pools and the transforms applied to them.

use super::{CharacterClass, ClassId};
use std::collections::BTreeSet;
use thiserror::Error;

/// ASCII lowercase letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// ASCII uppercase letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// ASCII digits.
pub const DIGITS: &str = "0123456789";
/// Default symbol pool.
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Visually similar glyphs removed by `avoid_ambiguous`.
pub const DEFAULT_AMBIGUOUS: &str = "0O1lI";

/// Brackets, quotes and punctuation removed by `avoid_ambiguous_symbols`.
pub const AMBIGUOUS_SYMBOLS: &str = "{}[]()/\\'\"~;:.<>";

/// Errors in a configured character set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The symbol pool has no characters.
    #[error("symbol set is empty")]
    EmptySymbols,
    /// A symbol appears more than once.
    #[error("symbol set repeats {0:?}")]
    DuplicateSymbol(char),
    /// A symbol is a letter or digit.
    #[error("symbol {0:?} overlaps a letter or digit class")]
    SymbolOverlapsBuiltin(char),
    /// A symbol is whitespace or a control character.
    #[error("character {0:?} is whitespace or a control character")]
    Unprintable(char),
}

/// Transforms requested by a policy, applied to every class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFilter {
    /// Drop the registry's ambiguous glyphs.
    pub avoid_ambiguous: bool,
    /// Drop brackets, quotes and similar punctuation.
    pub avoid_ambiguous_symbols: bool,
    /// Characters that must never appear.
    pub excluded: BTreeSet<char>,
}

/// The set of canonical character classes.
#[derive(Debug, Clone)]
pub struct CharacterRegistry {
    lower: CharacterClass,
    upper: CharacterClass,
    digit: CharacterClass,
    symbol: CharacterClass,
    ambiguous: BTreeSet<char>,
}

impl CharacterRegistry {
    /// Creates a registry with the default symbol and ambiguity sets.
    pub fn new() -> Self {
        Self {
            lower: CharacterClass::new(ClassId::Lower, LOWERCASE.chars()),
            upper: CharacterClass::new(ClassId::Upper, UPPERCASE.chars()),
            digit: CharacterClass::new(ClassId::Digit, DIGITS.chars()),
            symbol: CharacterClass::new(ClassId::Symbol, DEFAULT_SYMBOLS.chars()),
            ambiguous: DEFAULT_AMBIGUOUS.chars().collect(),
        }
    }

    /// Creates a registry with a custom symbol pool and ambiguity set.
    ///
    /// The symbol pool must be non-empty, duplicate-free, printable and
    /// disjoint from the letter and digit classes.
    pub fn with_sets(symbols: &str, ambiguous: &str) -> Result<Self, RegistryError> {
        if symbols.is_empty() {
            return Err(RegistryError::EmptySymbols);
        }

        let mut seen = BTreeSet::new();
        for ch in symbols.chars() {
            if ch.is_whitespace() || ch.is_control() {
                return Err(RegistryError::Unprintable(ch));
            }
            if ch.is_ascii_alphanumeric() {
                return Err(RegistryError::SymbolOverlapsBuiltin(ch));
            }
            if !seen.insert(ch) {
                return Err(RegistryError::DuplicateSymbol(ch));
            }
        }

        Ok(Self {
            symbol: CharacterClass::new(ClassId::Symbol, symbols.chars()),
            ambiguous: ambiguous.chars().collect(),
            ..Self::new()
        })
    }

    /// Returns the canonical pool of a built-in class.
    ///
    /// `Custom` has no canonical pool; see [`CharacterRegistry::custom`].
    pub fn class(&self, id: ClassId) -> Option<&CharacterClass> {
        match id {
            ClassId::Lower => Some(&self.lower),
            ClassId::Upper => Some(&self.upper),
            ClassId::Digit => Some(&self.digit),
            ClassId::Symbol => Some(&self.symbol),
            ClassId::Custom => None,
        }
    }

    /// Builds the custom class from user-supplied characters.
    ///
    /// Whitespace and control characters are never accepted into a pool.
    pub fn custom(&self, chars: &str) -> CharacterClass {
        CharacterClass::new(
            ClassId::Custom,
            chars.chars().filter(|c| !c.is_whitespace() && !c.is_control()),
        )
    }

    /// Returns the configured ambiguous glyphs.
    pub fn ambiguous(&self) -> &BTreeSet<char> {
        &self.ambiguous
    }

    /// Removes ambiguous glyphs and, optionally, ambiguous symbols.
    pub fn filter_ambiguous(
        &self,
        class: &CharacterClass,
        avoid_ambiguous: bool,
        avoid_symbols: bool,
    ) -> CharacterClass {
        class.without(|c| {
            (avoid_ambiguous && self.ambiguous.contains(&c))
                || (avoid_symbols && AMBIGUOUS_SYMBOLS.contains(c))
        })
    }

    /// Removes explicitly excluded characters.
    pub fn apply_exclusions(
        &self,
        class: &CharacterClass,
        excluded: &BTreeSet<char>,
    ) -> CharacterClass {
        class.without(|c| excluded.contains(&c))
    }

    /// Applies ambiguity filtering, then exclusion.
    pub fn derive(&self, class: &CharacterClass, filter: &ClassFilter) -> CharacterClass {
        let unambiguous =
            self.filter_ambiguous(class, filter.avoid_ambiguous, filter.avoid_ambiguous_symbols);
        self.apply_exclusions(&unambiguous, &filter.excluded)
    }
}

impl Default for CharacterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
