//! Heuristic strength check for an arbitrary password.
//!
//! Unlike [`estimate_policy`](super::estimate_policy) there is no policy to
//! reason from, so the pool is inferred from the kinds of characters the
//! password contains.

use super::estimator::{bits_for, Rating, Strength};

/// Assumed pool size when a password contains any non-alphanumeric character.
const OTHER_POOL: usize = 33;

const COMMON_SEQUENCES: &[&str] = &[
    "123", "234", "345", "456", "567", "678", "789", "abc", "qwe", "asd", "zxc", "password",
    "admin", "letmein",
];

/// One pass/fail line of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// What was checked.
    pub label: &'static str,
    /// Whether the password satisfied it.
    pub passed: bool,
}

impl Check {
    fn new(label: &'static str, passed: bool) -> Self {
        Self { label, passed }
    }
}

/// Result of analyzing a user-supplied password.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Length in characters.
    pub length: usize,
    /// Inferred pool size.
    pub pool_size: usize,
    /// Bits over the inferred pool.
    pub strength: Strength,
    /// Entropy tier, gated by length and character variety.
    pub rating: Rating,
    /// Checklist in display order.
    pub checks: Vec<Check>,
}

/// Analyzes a password.
pub fn analyze(password: &str) -> Analysis {
    let length = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_other = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let pool_size: usize = [
        (has_lower, 26),
        (has_upper, 26),
        (has_digit, 10),
        (has_other, OTHER_POOL),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|&(_, size)| size)
    .sum();

    let variety = [has_lower, has_upper, has_digit, has_other]
        .iter()
        .filter(|&&present| present)
        .count();

    let strength = Strength::from_bits(bits_for(length, pool_size));
    let has_repeat = has_triple_repeat(password);
    let has_sequence = has_common_sequence(password);

    let rating = rate(strength.bits(), length, variety);

    let checks = vec![
        Check::new("At least 8 characters", length >= 8),
        Check::new("At least 12 characters", length >= 12),
        Check::new("At least 16 characters", length >= 16),
        Check::new("Contains lowercase letters", has_lower),
        Check::new("Contains uppercase letters", has_upper),
        Check::new("Contains digits", has_digit),
        Check::new("Contains symbols", has_other),
        Check::new("Entropy >= 30 bits", strength.bits() >= 30.0),
        Check::new("Entropy >= 40 bits", strength.bits() >= 40.0),
        Check::new("No character repeated 3+ times in a row", !has_repeat),
        Check::new("No common sequences", !has_sequence),
    ];

    Analysis {
        length,
        pool_size,
        strength,
        rating,
        checks,
    }
}

/// Rates a user-supplied password.
///
/// Each tier needs enough bits, enough length and enough kinds of
/// character; falling short on any one drops the password a tier.
fn rate(bits: f64, length: usize, variety: usize) -> Rating {
    match (bits, length, variety) {
        (bits, _, _) if bits < 20.0 => Rating::VeryWeak,
        (bits, length, variety) if bits < 30.0 || length < 8 || variety < 2 => Rating::Weak,
        (bits, length, variety) if bits < 40.0 || length < 10 || variety < 3 => Rating::Medium,
        (bits, length, variety) if bits < 50.0 || length < 12 || variety < 4 => Rating::Strong,
        _ => Rating::VeryStrong,
    }
}

fn has_triple_repeat(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn has_common_sequence(password: &str) -> bool {
    let lowered = password.to_lowercase();
    COMMON_SEQUENCES.iter().any(|seq| lowered.contains(seq))
}
