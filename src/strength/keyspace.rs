//! Exact keyspace of a validated policy.

use crate::policy::ValidatedPolicy;

/// Counts the distinct passwords a policy admits, saturating at `u128::MAX`.
///
/// Classes are disjoint, so a password is a choice of how many positions
/// each class fills (at least its minimum), which positions those are, and
/// which characters go there:
///
/// ```text
/// dp[i][j] = Σ_{c = min_i..=j} dp[i-1][j-c] · C(j, c) · size_i^c
/// ```
///
/// Only saturating additions and multiplications are used, so the result
/// is exact whenever the true count fits and `u128::MAX` otherwise.
pub fn keyspace(policy: &ValidatedPolicy) -> u128 {
    let length = policy.length();
    let classes = policy.classes();

    let powers: Vec<Vec<u128>> = classes
        .iter()
        .map(|class| saturating_powers(class.chars().len() as u128, length))
        .collect();

    let mut dp = vec![vec![0u128; length + 1]; classes.len() + 1];
    dp[0][0] = 1;

    // Row `j` of Pascal's triangle, rebuilt in place.
    let mut binomial = vec![0u128; length + 1];
    binomial[0] = 1;

    for j in 0..=length {
        if j > 0 {
            for c in (1..=j).rev() {
                binomial[c] = binomial[c].saturating_add(binomial[c - 1]);
            }
        }

        for (i, class) in classes.iter().enumerate() {
            let mut total = 0u128;
            for c in class.min()..=j {
                let term = dp[i][j - c]
                    .saturating_mul(binomial[c])
                    .saturating_mul(powers[i][c]);
                total = total.saturating_add(term);
            }
            dp[i + 1][j] = total;
        }
    }

    dp[classes.len()][length]
}

fn saturating_powers(base: u128, max_exponent: usize) -> Vec<u128> {
    let mut powers = Vec::with_capacity(max_exponent + 1);
    let mut current = 1u128;
    for _ in 0..=max_exponent {
        powers.push(current);
        current = current.saturating_mul(base);
    }
    powers
}
