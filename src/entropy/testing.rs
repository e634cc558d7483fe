//! Deterministic entropy sources for tests only.

use super::{EntropyError, EntropySource, OsCsprng};

/// Returns a CSPRNG with a fixed seed that never reseeds.
pub(crate) fn seeded(seed: u64) -> OsCsprng {
    OsCsprng::from_seed_for_testing(seed)
}

/// Replays a fixed script of raw draws.
pub(crate) struct ScriptedEntropy {
    draws: Vec<u64>,
    position: usize,
}

impl ScriptedEntropy {
    pub(crate) fn new(draws: Vec<u64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of raw draws handed out so far.
    pub(crate) fn consumed(&self) -> usize {
        self.position
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_u64(&mut self) -> Result<u64, EntropyError> {
        let value = self
            .draws
            .get(self.position)
            .copied()
            .ok_or_else(|| EntropyError::Unavailable("script exhausted".into()))?;
        self.position += 1;
        Ok(value)
    }
}
