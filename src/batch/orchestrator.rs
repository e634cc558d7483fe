//! Batch generation with optional uniqueness.
//!
//! Uniqueness needs a single owner for the set of seen passwords, so unique
//! batches always run on the calling thread. Batches without that
//! constraint may be spread over worker threads sharing one entropy handle.

use crate::entropy::{EntropySource, SharedEntropy};
use crate::policy::ValidatedPolicy;
use crate::strength::keyspace;
use crate::synth::{GenerationError, GenerationResult, Synthesizer};
use std::collections::HashSet;
use std::sync::Arc;

/// Hard ceiling on a single batch, whatever the configured maximum.
pub const MAX_BATCH: usize = 1 << 24;

/// Default configured maximum batch size.
pub const DEFAULT_MAX_COUNT: usize = 100_000;

/// Upper bound on up-front allocation; larger batches grow as they fill.
const PREALLOCATE_LIMIT: usize = 4096;

/// Generates exactly `count` passwords on the calling thread.
///
/// A `count` above [`MAX_BATCH`] fails with
/// [`GenerationError::CountOutOfRange`]. With `unique`, a policy whose
/// keyspace is smaller than `count` fails with
/// [`GenerationError::InsufficientKeyspace`] before anything is drawn,
/// and collisions are redrawn.
pub fn generate_batch<E: EntropySource>(
    synth: &mut Synthesizer<E>,
    policy: &Arc<ValidatedPolicy>,
    count: usize,
    unique: bool,
) -> Result<Vec<GenerationResult>, GenerationError> {
    check_count(count, MAX_BATCH)?;

    if !unique {
        return (0..count).map(|_| synth.synthesize(policy)).collect();
    }

    let available = keyspace(policy);
    if available < count as u128 {
        return Err(GenerationError::InsufficientKeyspace {
            requested: count,
            keyspace: available,
        });
    }

    let capacity = count.min(PREALLOCATE_LIMIT);
    let mut seen = HashSet::with_capacity(capacity);
    let mut results = Vec::with_capacity(capacity);
    let mut collisions = 0u64;

    while results.len() < count {
        let result = synth.synthesize(policy)?;
        if seen.insert(result.password().to_owned()) {
            results.push(result);
        } else {
            collisions += 1;
        }
    }

    tracing::debug!(count, collisions, keyspace = %available, "Unique batch generated");
    Ok(results)
}

fn check_count(count: usize, max: usize) -> Result<(), GenerationError> {
    if count > max {
        return Err(GenerationError::CountOutOfRange {
            requested: count,
            max,
        });
    }
    Ok(())
}

/// Runs batches, in parallel where uniqueness allows.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    workers: usize,
    max_count: usize,
}

impl BatchOrchestrator {
    /// Creates an orchestrator with up to `workers` threads.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    /// Sets the largest batch [`run`](Self::run) accepts, capped at [`MAX_BATCH`].
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count.min(MAX_BATCH);
        self
    }

    /// Number of worker threads used for batches without uniqueness.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Largest accepted batch.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Generates `count` passwords.
    pub fn run(
        &self,
        entropy: &SharedEntropy,
        policy: &Arc<ValidatedPolicy>,
        count: usize,
        unique: bool,
    ) -> Result<Vec<GenerationResult>, GenerationError> {
        check_count(count, self.max_count)?;

        let workers = self.workers.min(count);
        if unique || workers <= 1 {
            let mut synth = Synthesizer::new(entropy.clone());
            return generate_batch(&mut synth, policy, count, unique);
        }

        tracing::debug!(count, workers, "Generating batch in parallel");

        let per_worker = count / workers;
        let remainder = count % workers;

        std::thread::scope(|scope| -> Result<Vec<GenerationResult>, GenerationError> {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let share = per_worker + usize::from(worker < remainder);
                    let mut synth = Synthesizer::new(entropy.clone());
                    let policy = Arc::clone(policy);
                    scope.spawn(move || generate_batch(&mut synth, &policy, share, false))
                })
                .collect();

            let mut results = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
            for handle in handles {
                let batch = handle
                    .join()
                    .map_err(|_| GenerationError::WorkerPanicked)??;
                results.extend(batch);
            }
            Ok(results)
        })
    }
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self::new(1)
    }
}
