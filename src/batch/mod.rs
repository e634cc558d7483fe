//! Generating many passwords under one policy.

mod orchestrator;

pub use orchestrator::{generate_batch, BatchOrchestrator, DEFAULT_MAX_COUNT, MAX_BATCH};
