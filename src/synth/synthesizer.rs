//! Coverage-guaranteeing, uniformly random password assembly.
//!
//! # Algorithm
//!
//! 1. For each required class with minimum `k`, draw `k` characters from
//!    that class and place each at a position drawn uniformly, without
//!    replacement, from the still-open positions.
//! 2. Fill every remaining position from the whole pool.
//! 3. Fisher-Yates shuffle the filler positions.
//!
//! Placement in step 1 is already position-uniform, so guaranteed-class
//! characters carry no bias toward the front of the string.

use super::GenerationResult;
use crate::entropy::{EntropyError, EntropySource};
use crate::policy::ValidatedPolicy;
use crate::strength;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while generating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The entropy source failed.
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    /// A unique batch asked for more passwords than the policy admits.
    #[error("requested {requested} unique passwords but the policy admits only {keyspace}")]
    InsufficientKeyspace { requested: usize, keyspace: u128 },

    /// A batch asked for more passwords than allowed.
    #[error("requested {requested} passwords, more than the batch limit {max}")]
    CountOutOfRange { requested: usize, max: usize },

    /// A batch worker thread panicked.
    #[error("batch worker panicked")]
    WorkerPanicked,
}

/// Assembles passwords from an injected entropy source.
pub struct Synthesizer<E> {
    entropy: E,
}

impl<E: EntropySource> Synthesizer<E> {
    /// Creates a synthesizer drawing from `entropy`.
    pub fn new(entropy: E) -> Self {
        Self { entropy }
    }

    /// Returns the entropy source.
    pub fn into_inner(self) -> E {
        self.entropy
    }

    /// Generates one password and its strength.
    pub fn synthesize(
        &mut self,
        policy: &Arc<ValidatedPolicy>,
    ) -> Result<GenerationResult, GenerationError> {
        let password = self.draw(policy)?;
        let strength = strength::estimate_policy(policy);
        Ok(GenerationResult::new(password, Arc::clone(policy), strength))
    }

    /// Generates the characters of one password.
    pub fn draw(&mut self, policy: &ValidatedPolicy) -> Result<String, EntropyError> {
        let length = policy.length();
        let mut slots: Vec<Option<char>> = vec![None; length];
        let mut open: Vec<usize> = (0..length).collect();

        for class in policy.required() {
            let chars = class.chars();
            for _ in 0..class.min() {
                let ch = chars[self.entropy.next_index(chars.len())?];
                let slot = self.entropy.next_index(open.len())?;
                let position = open.swap_remove(slot);
                slots[position] = Some(ch);
            }
        }

        let pool = policy.pool();
        for &position in &open {
            slots[position] = Some(pool[self.entropy.next_index(pool.len())?].ch);
        }

        for i in (1..open.len()).rev() {
            let j = self.entropy.next_index(i + 1)?;
            slots.swap(open[i], open[j]);
        }

        let password: String = slots.into_iter().flatten().collect();
        debug_assert_eq!(password.chars().count(), length);

        tracing::trace!(
            length,
            guaranteed = length - open.len(),
            "Password synthesized"
        );

        Ok(password)
    }
}

impl<E> std::fmt::Debug for Synthesizer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::ClassId;
    use crate::entropy::testing::{seeded, ScriptedEntropy};
    use crate::policy::{Policy, Validator};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn validate(policy: Policy) -> Arc<ValidatedPolicy> {
        Arc::new(Validator::default().validate(&policy).unwrap())
    }

    fn count_class(policy: &ValidatedPolicy, password: &str, class: ClassId) -> usize {
        password
            .chars()
            .filter(|&c| policy.class_of(c) == Some(class))
            .count()
    }

    #[test]
    fn test_twelve_char_scenario() {
        let policy = validate(
            Policy::standard(12)
                .require(ClassId::Upper, 1)
                .require(ClassId::Digit, 1)
                .require(ClassId::Symbol, 1),
        );
        let mut synth = Synthesizer::new(seeded(1));

        for _ in 0..500 {
            let result = synth.synthesize(&policy).unwrap();
            let password = result.password();
            assert_eq!(password.chars().count(), 12);
            assert!(password.chars().any(|c| c.is_ascii_uppercase()));
            assert!(password.chars().any(|c| c.is_ascii_digit()));
            assert!(password.chars().any(|c| !c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_two_lower_two_upper_arrangements() {
        let policy = validate(
            Policy::new(4)
                .require(ClassId::Lower, 2)
                .require(ClassId::Upper, 2),
        );
        let mut synth = Synthesizer::new(seeded(2));
        let mut arrangements = HashSet::new();

        for _ in 0..3000 {
            let password = synth.draw(&policy).unwrap();
            assert_eq!(password.chars().filter(|c| c.is_ascii_lowercase()).count(), 2);
            assert_eq!(password.chars().filter(|c| c.is_ascii_uppercase()).count(), 2);
            let shape: String = password
                .chars()
                .map(|c| if c.is_ascii_lowercase() { 'l' } else { 'U' })
                .collect();
            arrangements.insert(shape);
        }

        assert_eq!(arrangements.len(), 6);
    }

    #[test]
    fn test_exact_minimums_need_no_fill() {
        let policy = validate(Policy::new(3).require(ClassId::Digit, 3));
        // Per character: one class draw, one position draw; no fill draws.
        // Shuffle over zero open positions draws nothing either.
        let mut synth = Synthesizer::new(ScriptedEntropy::new(vec![u64::MAX; 6]));
        let password = synth.draw(&policy).unwrap();
        assert_eq!(synth.into_inner().consumed(), 6);
        assert_eq!(password.chars().count(), 3);
    }

    #[test]
    fn test_single_class_degrades_gracefully() {
        let policy = validate(Policy::new(20).include(ClassId::Digit));
        let mut synth = Synthesizer::new(seeded(3));
        let password = synth.draw(&policy).unwrap();
        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_single_char_distribution_uniform() {
        const DRAWS: usize = 100_000;
        let policy = validate(Policy::new(1).include(ClassId::Lower));
        let mut synth = Synthesizer::new(seeded(4));
        let mut counts = [0usize; 26];

        for _ in 0..DRAWS {
            let password = synth.draw(&policy).unwrap();
            let ch = password.chars().next().unwrap();
            counts[(ch as u8 - b'a') as usize] += 1;
        }

        let expected = DRAWS as f64 / 26.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| (observed as f64 - expected).powi(2) / expected)
            .sum();
        assert!(chi_square < 70.0, "chi-square {chi_square} too large");
    }

    #[test]
    fn test_guaranteed_chars_not_front_loaded() {
        const SAMPLES: usize = 8000;
        let policy = validate(
            Policy::new(8)
                .include(ClassId::Lower)
                .require(ClassId::Digit, 1),
        );
        let mut synth = Synthesizer::new(seeded(5));
        let mut digit_at = [0usize; 8];

        for _ in 0..SAMPLES {
            let password = synth.draw(&policy).unwrap();
            for (position, ch) in password.chars().enumerate() {
                if ch.is_ascii_digit() {
                    digit_at[position] += 1;
                }
            }
        }

        // Expected roughly 2900 per position.
        for count in digit_at {
            assert!(count > 2000, "position starved: {digit_at:?}");
        }
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let policy = validate(Policy::standard(16));
        let mut synth = Synthesizer::new(ScriptedEntropy::new(vec![1, 2, 3]));
        assert!(matches!(
            synth.synthesize(&policy),
            Err(GenerationError::Entropy(EntropyError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_result_carries_strength() {
        let policy = validate(Policy::new(10).include(ClassId::Digit));
        let mut synth = Synthesizer::new(seeded(6));
        let result = synth.synthesize(&policy).unwrap();
        assert!((result.strength().bits() - 10.0 * 10f64.log2()).abs() < 1e-9);
        assert_eq!(result.policy().length(), 10);
    }

    fn arb_policy() -> impl Strategy<Value = Policy> {
        (
            1usize..48,
            prop::array::uniform4(0usize..4),
            prop::collection::btree_set(
                prop::sample::select("abcxyzABCXYZ0123456789!@#".chars().collect::<Vec<_>>()),
                0..12,
            ),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(length, mins, exclude, ambiguous, ambiguous_symbols)| {
                let mut policy = Policy::new(length)
                    .avoid_ambiguous(ambiguous)
                    .avoid_ambiguous_symbols(ambiguous_symbols)
                    .exclude(exclude);
                for (class, min) in ClassId::BUILTIN.into_iter().zip(mins) {
                    policy = policy.require(class, min);
                }
                policy
            })
    }

    proptest! {
        #[test]
        fn synthesized_passwords_honor_policy(policy in arb_policy(), seed in any::<u64>()) {
            let validator = Validator::default();
            let Ok(validated) = validator.validate(&policy) else {
                return Ok(());
            };
            let validated = Arc::new(validated);

            let mut synth = Synthesizer::new(seeded(seed));
            let result = synth.synthesize(&validated).unwrap();
            let password = result.password();

            prop_assert_eq!(password.chars().count(), policy.length);

            for ch in password.chars() {
                prop_assert!(!policy.exclude.contains(&ch));
                if policy.avoid_ambiguous {
                    prop_assert!(!validator.registry().ambiguous().contains(&ch));
                }
                if policy.avoid_ambiguous_symbols {
                    prop_assert!(!crate::charset::AMBIGUOUS_SYMBOLS.contains(ch));
                }
            }

            for class in validated.required() {
                prop_assert!(count_class(&validated, password, class.id()) >= class.min());
            }
        }
    }
}
