//! Bits-of-entropy estimation.

use crate::policy::ValidatedPolicy;
use crate::synth::GenerationResult;
use std::fmt;

/// Coarse strength buckets, by bits of entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rating {
    /// Below 28 bits.
    VeryWeak,
    /// Below 36 bits.
    Weak,
    /// Below 60 bits.
    Medium,
    /// Below 128 bits.
    Strong,
    /// 128 bits or more.
    VeryStrong,
}

impl Rating {
    /// Buckets a bit count.
    pub fn from_bits(bits: f64) -> Self {
        match bits {
            b if b < 28.0 => Rating::VeryWeak,
            b if b < 36.0 => Rating::Weak,
            b if b < 60.0 => Rating::Medium,
            b if b < 128.0 => Rating::Strong,
            _ => Rating::VeryStrong,
        }
    }

    /// Lowercase display label.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::VeryWeak => "very weak",
            Rating::Weak => "weak",
            Rating::Medium => "medium",
            Rating::Strong => "strong",
            Rating::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Estimated resistance to guessing, in bits.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Strength {
    bits: f64,
}

impl Strength {
    /// Wraps a bit count.
    pub fn from_bits(bits: f64) -> Self {
        Self { bits }
    }

    /// Bits of entropy.
    #[inline]
    pub fn bits(&self) -> f64 {
        self.bits
    }

    /// Bucket for these bits.
    pub fn rating(&self) -> Rating {
        Rating::from_bits(self.bits)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} bits ({})", self.bits, self.rating())
    }
}

/// `length * log2(pool_size)`; zero for a single-symbol or empty pool.
pub fn bits_for(length: usize, pool_size: usize) -> f64 {
    if pool_size <= 1 {
        return 0.0;
    }
    length as f64 * (pool_size as f64).log2()
}

/// Strength of any password the policy can produce.
pub fn estimate_policy(policy: &ValidatedPolicy) -> Strength {
    Strength::from_bits(bits_for(policy.length(), policy.pool_size()))
}

/// Strength of a generated password, from the policy it satisfies.
pub fn estimate(result: &GenerationResult) -> Strength {
    estimate_policy(result.policy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::ClassId;
    use crate::policy::{Policy, Validator};
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_eq!(bits_for(8, 2), 8.0);
        assert_eq!(bits_for(4, 16), 16.0);
        assert_eq!(bits_for(10, 1), 0.0);
        assert_eq!(bits_for(10, 0), 0.0);
    }

    #[test]
    fn test_uses_policy_pool_not_used_chars() {
        let policy = Validator::default()
            .validate(&Policy::standard(12).require(ClassId::Digit, 1))
            .unwrap();
        let strength = estimate_policy(&policy);
        let expected = 12.0 * 88f64.log2();
        assert!((strength.bits() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rating_buckets() {
        assert_eq!(Rating::from_bits(10.0), Rating::VeryWeak);
        assert_eq!(Rating::from_bits(30.0), Rating::Weak);
        assert_eq!(Rating::from_bits(50.0), Rating::Medium);
        assert_eq!(Rating::from_bits(100.0), Rating::Strong);
        assert_eq!(Rating::from_bits(128.0), Rating::VeryStrong);
    }

    #[test]
    fn test_display() {
        let strength = Strength::from_bits(42.0);
        assert_eq!(strength.to_string(), "42.00 bits (medium)");
    }

    proptest! {
        #[test]
        fn bits_monotonic_in_length(pool in 1usize..500, len in 0usize..1024) {
            prop_assert!(bits_for(len + 1, pool) >= bits_for(len, pool));
        }

        #[test]
        fn bits_monotonic_in_pool(pool in 0usize..500, len in 0usize..1024) {
            prop_assert!(bits_for(len, pool + 1) >= bits_for(len, pool));
        }
    }
}
