//! The entropy source contract and bias-free bounded sampling.

use thiserror::Error;

/// Upper bound on redraws for a single bounded index.
///
/// A raw draw is rejected with probability below one half, so exhausting
/// this budget happens with probability below 2^-64.
pub const MAX_REJECTIONS: u32 = 64;

/// Errors raised while drawing randomness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// An index was requested from an empty range.
    #[error("invalid index bound {bound}: must be positive")]
    InvalidArgument { bound: usize },

    /// Every redraw landed in the biased zone.
    #[error("rejection sampling exhausted {attempts} attempts for bound {bound}")]
    RejectionLimit { bound: usize, attempts: u32 },

    /// The OS random source failed.
    #[error("OS random source unavailable: {0}")]
    Unavailable(String),

    /// The OS random source produced suspicious output.
    #[error("entropy health check failed: {0}")]
    HealthCheckFailed(String),
}

/// A source of uniformly distributed randomness.
///
/// Implementors only provide raw 64-bit draws; bounded sampling is shared.
pub trait EntropySource {
    /// Draws 64 uniformly distributed bits.
    fn next_u64(&mut self) -> Result<u64, EntropyError>;

    /// Draws an index uniformly from `[0, bound)`.
    ///
    /// Raw values in the remainder range `[0, 2^64 mod bound)` would make
    /// low indices slightly more likely under a plain modulo, so they are
    /// discarded and redrawn.
    fn next_index(&mut self, bound: usize) -> Result<usize, EntropyError> {
        if bound == 0 {
            return Err(EntropyError::InvalidArgument { bound });
        }

        let modulus = bound as u64;
        let zone = modulus.wrapping_neg() % modulus;

        for _ in 0..MAX_REJECTIONS {
            let raw = self.next_u64()?;
            if raw >= zone {
                return Ok((raw % modulus) as usize);
            }
            tracing::trace!(bound, "rejected biased draw");
        }

        Err(EntropyError::RejectionLimit {
            bound,
            attempts: MAX_REJECTIONS,
        })
    }
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn next_u64(&mut self) -> Result<u64, EntropyError> {
        (**self).next_u64()
    }

    fn next_index(&mut self, bound: usize) -> Result<usize, EntropyError> {
        (**self).next_index(bound)
    }
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn next_u64(&mut self) -> Result<u64, EntropyError> {
        (**self).next_u64()
    }

    fn next_index(&mut self, bound: usize) -> Result<usize, EntropyError> {
        (**self).next_index(bound)
    }
}
