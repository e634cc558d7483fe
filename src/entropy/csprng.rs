//! ChaCha-based CSPRNG seeded from the operating system.
//!
//! # Reseeding Model
//!
//! After a configured number of output bytes the generator pulls fresh OS
//! randomness and derives a new key with BLAKE3 over:
//! - A domain separator and reseed counter
//! - Previous seed material (retained across reseeds)
//! - The fresh OS bytes
//!
//! A failed OS read is an error. There is no fallback to a weaker source.

use super::{EntropyError, EntropySource, RepetitionTest};
use blake3::Hasher;
use rand_chacha::ChaCha20Rng;
use rand_core::{OsRng, RngCore, SeedableRng};

/// Domain separator for reseeding operations.
const RESEED_DOMAIN: &[u8] = b"passgen-csprng-reseed-v1";

/// Default number of output bytes between reseeds (1 MiB).
pub const DEFAULT_RESEED_INTERVAL: u64 = 1 << 20;

/// Smallest accepted reseed interval, one 64-bit draw.
const MIN_RESEED_INTERVAL: u64 = 8;

/// The production entropy source.
pub struct OsCsprng {
    /// The underlying ChaCha20 CSPRNG.
    inner: ChaCha20Rng,
    /// Retained seed material for mixing during reseed.
    seed_material: [u8; 32],
    /// Output bytes allowed between reseeds.
    reseed_interval: u64,
    /// Total reseeds performed.
    reseed_count: u64,
    /// Bytes generated since last reseed.
    bytes_since_reseed: u64,
    /// Health test applied to every OS read.
    health: RepetitionTest,
}

impl OsCsprng {
    /// Creates a CSPRNG seeded from the OS with the default reseed interval.
    pub fn from_os_entropy() -> Result<Self, EntropyError> {
        Self::with_reseed_interval(DEFAULT_RESEED_INTERVAL)
    }

    /// Creates a CSPRNG that reseeds after `interval` output bytes.
    pub fn with_reseed_interval(interval: u64) -> Result<Self, EntropyError> {
        let mut health = RepetitionTest::new();
        let seed_material = read_os_seed(&mut health)?;

        tracing::debug!(reseed_interval = interval, "CSPRNG seeded from OS entropy");

        Ok(Self {
            inner: ChaCha20Rng::from_seed(seed_material),
            seed_material,
            reseed_interval: interval.max(MIN_RESEED_INTERVAL),
            reseed_count: 0,
            bytes_since_reseed: 0,
            health,
        })
    }

    /// Creates a deterministic CSPRNG that never reseeds (for testing only).
    #[cfg(test)]
    pub(crate) fn from_seed_for_testing(seed: u64) -> Self {
        let inner = ChaCha20Rng::seed_from_u64(seed);
        Self {
            seed_material: inner.get_seed(),
            inner,
            reseed_interval: u64::MAX,
            reseed_count: 0,
            bytes_since_reseed: 0,
            health: RepetitionTest::new(),
        }
    }

    /// Mixes fresh OS randomness into the generator key.
    pub fn reseed(&mut self) -> Result<(), EntropyError> {
        let fresh = read_os_seed(&mut self.health)?;

        let mut hasher = Hasher::new();
        hasher.update(RESEED_DOMAIN);
        hasher.update(&self.reseed_count.to_le_bytes());
        hasher.update(&self.seed_material);
        hasher.update(&fresh);

        let new_seed_material: [u8; 32] = *hasher.finalize().as_bytes();

        self.seed_material = new_seed_material;
        self.inner = ChaCha20Rng::from_seed(new_seed_material);
        self.reseed_count += 1;
        self.bytes_since_reseed = 0;

        tracing::info!(
            reseed_count = self.reseed_count,
            "CSPRNG reseeded via BLAKE3 mixing"
        );

        Ok(())
    }

    /// Returns the number of reseeds performed.
    pub fn reseed_count(&self) -> u64 {
        self.reseed_count
    }

    /// Returns bytes generated since last reseed.
    pub fn bytes_since_reseed(&self) -> u64 {
        self.bytes_since_reseed
    }
}

impl EntropySource for OsCsprng {
    fn next_u64(&mut self) -> Result<u64, EntropyError> {
        if self.bytes_since_reseed >= self.reseed_interval {
            self.reseed()?;
        }
        self.bytes_since_reseed += 8;
        Ok(self.inner.next_u64())
    }
}

impl std::fmt::Debug for OsCsprng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsCsprng")
            .field("reseed_interval", &self.reseed_interval)
            .field("reseed_count", &self.reseed_count)
            .field("bytes_since_reseed", &self.bytes_since_reseed)
            .finish_non_exhaustive()
    }
}

fn read_os_seed(health: &mut RepetitionTest) -> Result<[u8; 32], EntropyError> {
    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .map_err(|e| EntropyError::Unavailable(e.to_string()))?;
    health.check(&seed)?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_seeded_generators_differ() {
        let mut a = OsCsprng::from_os_entropy().unwrap();
        let mut b = OsCsprng::from_os_entropy().unwrap();
        assert_ne!(a.next_u64().unwrap(), b.next_u64().unwrap());
    }

    #[test]
    fn test_bytes_since_reseed_tracking() {
        let mut rng = OsCsprng::from_os_entropy().unwrap();
        for _ in 0..10 {
            rng.next_u64().unwrap();
        }
        assert_eq!(rng.bytes_since_reseed(), 80);
        assert_eq!(rng.reseed_count(), 0);
    }

    #[test]
    fn test_reseeds_after_interval() {
        let mut rng = OsCsprng::with_reseed_interval(16).unwrap();

        rng.next_u64().unwrap();
        rng.next_u64().unwrap();
        assert_eq!(rng.reseed_count(), 0);

        rng.next_u64().unwrap();
        assert_eq!(rng.reseed_count(), 1);
        assert_eq!(rng.bytes_since_reseed(), 8);
    }

    #[test]
    fn test_tiny_interval_clamped() {
        let mut rng = OsCsprng::with_reseed_interval(0).unwrap();
        rng.next_u64().unwrap();
        assert_eq!(rng.reseed_count(), 0);
        rng.next_u64().unwrap();
        assert_eq!(rng.reseed_count(), 1);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = OsCsprng::from_seed_for_testing(42);
        let mut b = OsCsprng::from_seed_for_testing(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64().unwrap(), b.next_u64().unwrap());
        }
    }

    #[test]
    fn test_reseed_changes_output() {
        let mut a = OsCsprng::from_seed_for_testing(7);
        let mut b = OsCsprng::from_seed_for_testing(7);

        a.reseed().unwrap();

        let out_a: Vec<u64> = (0..4).map(|_| a.next_u64().unwrap()).collect();
        let out_b: Vec<u64> = (0..4).map(|_| b.next_u64().unwrap()).collect();
        assert_ne!(out_a, out_b);
    }
}
