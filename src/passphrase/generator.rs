//! Passphrase assembly.

use super::WORDS;
use crate::entropy::{EntropyError, EntropySource};
use crate::strength::Strength;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted word count.
pub const MAX_WORDS: usize = 64;

/// Inserted numbers are drawn from `100..=999`.
const NUMBER_LOW: usize = 100;
const NUMBER_SPAN: usize = 900;

const SYMBOLS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Errors that can occur while generating a passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassphraseError {
    /// The word count is zero or above the maximum.
    #[error("word count {words} is outside the allowed range 1..={max}")]
    WordCountOutOfRange { words: usize, max: usize },

    /// The entropy source failed.
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Shape of a passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassphrasePolicy {
    /// Number of words.
    pub words: usize,
    /// Text placed between parts.
    pub separator: String,
    /// Insert a three-digit number at a random position.
    pub include_number: bool,
    /// Insert a symbol at a random position.
    pub include_symbol: bool,
}

impl Default for PassphrasePolicy {
    fn default() -> Self {
        Self {
            words: 4,
            separator: " ".to_string(),
            include_number: false,
            include_symbol: false,
        }
    }
}

/// A generated passphrase.
#[derive(Clone)]
pub struct Passphrase {
    text: String,
    parts: usize,
    strength: Strength,
}

impl Passphrase {
    /// The passphrase text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of separated parts, words plus inserted tokens.
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Strength over the word list and insertion choices.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Consumes the passphrase, returning its text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Passphrase")
            .field("parts", &self.parts)
            .field("strength", &self.strength)
            .finish_non_exhaustive()
    }
}

/// Generates a passphrase.
pub fn generate<E: EntropySource>(
    entropy: &mut E,
    policy: &PassphrasePolicy,
) -> Result<Passphrase, PassphraseError> {
    if policy.words == 0 || policy.words > MAX_WORDS {
        return Err(PassphraseError::WordCountOutOfRange {
            words: policy.words,
            max: MAX_WORDS,
        });
    }

    let mut bits = policy.words as f64 * (WORDS.len() as f64).log2();
    let mut parts: Vec<String> = Vec::with_capacity(policy.words + 2);
    for _ in 0..policy.words {
        parts.push(WORDS[entropy.next_index(WORDS.len())?].to_string());
    }

    if policy.include_number {
        let number = NUMBER_LOW + entropy.next_index(NUMBER_SPAN)?;
        let position = entropy.next_index(parts.len() + 1)?;
        bits += (NUMBER_SPAN as f64).log2() + ((parts.len() + 1) as f64).log2();
        parts.insert(position, number.to_string());
    }

    if policy.include_symbol {
        let symbol = SYMBOLS[entropy.next_index(SYMBOLS.len())?];
        let position = entropy.next_index(parts.len() + 1)?;
        bits += (SYMBOLS.len() as f64).log2() + ((parts.len() + 1) as f64).log2();
        parts.insert(position, symbol.to_string());
    }

    tracing::trace!(parts = parts.len(), bits, "Passphrase generated");

    Ok(Passphrase {
        text: parts.join(&policy.separator),
        parts: parts.len(),
        strength: Strength::from_bits(bits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::testing::seeded;

    #[test]
    fn test_word_count_bounds() {
        let mut entropy = seeded(1);
        for words in [0, MAX_WORDS + 1] {
            let policy = PassphrasePolicy {
                words,
                ..Default::default()
            };
            assert!(matches!(
                generate(&mut entropy, &policy),
                Err(PassphraseError::WordCountOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_plain_passphrase() {
        let mut entropy = seeded(2);
        let policy = PassphrasePolicy {
            words: 5,
            separator: "-".to_string(),
            ..Default::default()
        };
        let phrase = generate(&mut entropy, &policy).unwrap();

        let words: Vec<&str> = phrase.as_str().split('-').collect();
        assert_eq!(words.len(), 5);
        assert!(words.iter().all(|w| WORDS.contains(w)));
        assert!((phrase.strength().bits() - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_number_and_symbol_inserted() {
        let mut entropy = seeded(3);
        let policy = PassphrasePolicy {
            words: 3,
            separator: " ".to_string(),
            include_number: true,
            include_symbol: true,
        };

        for _ in 0..50 {
            let phrase = generate(&mut entropy, &policy).unwrap();
            let parts: Vec<&str> = phrase.as_str().split(' ').collect();
            assert_eq!(parts.len(), 5);
            assert_eq!(phrase.parts(), 5);

            let numbers: Vec<&&str> = parts
                .iter()
                .filter(|p| p.chars().all(|c| c.is_ascii_digit()))
                .collect();
            assert_eq!(numbers.len(), 1);
            let value: usize = numbers[0].parse().unwrap();
            assert!((100..=999).contains(&value));

            assert_eq!(
                parts
                    .iter()
                    .filter(|p| p.len() == 1 && SYMBOLS.contains(&p.chars().next().unwrap()))
                    .count(),
                1
            );
            assert!(phrase.strength().bits() > 21.0);
        }
    }
}
