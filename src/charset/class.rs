//! Character class identifiers and pools.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a character class.
///
/// The declaration order is the canonical order used when classes of one
/// policy overlap: an earlier class keeps a shared character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassId {
    /// ASCII lowercase letters.
    Lower,
    /// ASCII uppercase letters.
    Upper,
    /// ASCII digits.
    Digit,
    /// Punctuation symbols.
    Symbol,
    /// User-supplied characters.
    Custom,
}

impl ClassId {
    /// The four built-in classes, in canonical order.
    pub const BUILTIN: [ClassId; 4] = [
        ClassId::Lower,
        ClassId::Upper,
        ClassId::Digit,
        ClassId::Symbol,
    ];

    /// Returns the lowercase name of the class.
    pub fn name(&self) -> &'static str {
        match self {
            ClassId::Lower => "lower",
            ClassId::Upper => "upper",
            ClassId::Digit => "digit",
            ClassId::Symbol => "symbol",
            ClassId::Custom => "custom",
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, duplicate-free pool of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    id: ClassId,
    chars: Vec<char>,
}

impl CharacterClass {
    /// Creates a class, dropping repeated characters but keeping first-seen order.
    pub fn new(id: ClassId, chars: impl IntoIterator<Item = char>) -> Self {
        let mut unique = Vec::new();
        for ch in chars {
            if !unique.contains(&ch) {
                unique.push(ch);
            }
        }
        Self { id, chars: unique }
    }

    /// Returns the class identifier.
    #[inline]
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Returns the characters in order.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of characters in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the pool has no characters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns true if `ch` is in the pool.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Returns a copy without the characters matching `reject`.
    pub fn without(&self, mut reject: impl FnMut(char) -> bool) -> Self {
        Self {
            id: self.id,
            chars: self.chars.iter().copied().filter(|&c| !reject(c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_dropped_in_order() {
        let class = CharacterClass::new(ClassId::Custom, "abacab".chars());
        assert_eq!(class.chars(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_without_keeps_identity() {
        let class = CharacterClass::new(ClassId::Digit, "0123".chars());
        let filtered = class.without(|c| c == '0');
        assert_eq!(filtered.id(), ClassId::Digit);
        assert_eq!(filtered.chars(), &['1', '2', '3']);
    }

    #[test]
    fn test_canonical_order() {
        assert!(ClassId::Lower < ClassId::Upper);
        assert!(ClassId::Symbol < ClassId::Custom);
    }
}
