//! Continuous health test for OS seed reads.
//!
//! Fail-closed: a stuck or repeating OS source stops generation instead
//! of silently feeding the CSPRNG predictable seed material.

use super::EntropyError;

/// Repetition-count style test over successive seed reads.
#[derive(Debug, Default)]
pub struct RepetitionTest {
    /// Previous accepted sample.
    previous: Option<[u8; 32]>,
    /// Total samples checked.
    total_samples: u64,
    /// Total samples rejected.
    failures: u64,
}

impl RepetitionTest {
    /// Creates a test with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a freshly read seed.
    ///
    /// Rejects a sample identical to the previous one, and a sample whose
    /// bytes are all equal.
    pub fn check(&mut self, sample: &[u8; 32]) -> Result<(), EntropyError> {
        self.total_samples += 1;

        let violation = if self.previous.as_ref() == Some(sample) {
            Some("OS source repeated its previous output")
        } else if sample.iter().all(|&b| b == sample[0]) {
            Some("OS source returned a constant block")
        } else {
            None
        };

        if let Some(reason) = violation {
            self.failures += 1;
            tracing::warn!(
                total_samples = self.total_samples,
                failures = self.failures,
                "{}",
                reason
            );
            return Err(EntropyError::HealthCheckFailed(reason.to_string()));
        }

        self.previous = Some(*sample);
        tracing::trace!(total_samples = self.total_samples, "Seed health check passed");
        Ok(())
    }

    /// Returns the number of samples checked.
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Returns the number of rejected samples.
    pub fn failures(&self) -> u64 {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(offset: u8) -> [u8; 32] {
        let mut data = [0u8; 32];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(17).wrapping_add(offset);
        }
        data
    }

    #[test]
    fn test_distinct_samples_pass() {
        let mut test = RepetitionTest::new();
        assert!(test.check(&sample(1)).is_ok());
        assert!(test.check(&sample(2)).is_ok());
        assert_eq!(test.total_samples(), 2);
        assert_eq!(test.failures(), 0);
    }

    #[test]
    fn test_repeated_sample_fails() {
        let mut test = RepetitionTest::new();
        test.check(&sample(7)).unwrap();
        assert!(matches!(
            test.check(&sample(7)),
            Err(EntropyError::HealthCheckFailed(_))
        ));
        assert_eq!(test.failures(), 1);
    }

    #[test]
    fn test_constant_sample_fails() {
        let mut test = RepetitionTest::new();
        assert!(matches!(
            test.check(&[0xAB; 32]),
            Err(EntropyError::HealthCheckFailed(_))
        ));
    }
}
