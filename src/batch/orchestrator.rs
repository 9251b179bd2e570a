//! Batch Orchestrator
//!
//! Processes identifiers in consecutive chunks. All fetches of a chunk run
//! concurrently and are awaited together; the next chunk starts only once every
//! fetch of the current one has settled.

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::batch::BatchResult;
use crate::error::Result;

/// Default number of concurrent fetches per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 5;

// == Batch Orchestrator ==
/// Bounded-concurrency batch runner that tolerates partial failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOrchestrator {
    chunk_size: usize,
}

impl Default for BatchOrchestrator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl BatchOrchestrator {
    /// Creates an orchestrator; a chunk size of 0 is treated as 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    // == Run Batch ==
    /// Fetches every id, `chunk_size` at a time, and records each outcome.
    ///
    /// Never fails as a whole: per-item errors are collected into the result
    /// with their message.
    pub async fn run_batch<I, V, F, Fut>(&self, ids: &[I], fetch: F) -> BatchResult<I, V>
    where
        I: Clone + Display,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let rounds = ids.len().div_ceil(self.chunk_size);
        info!(
            items = ids.len(),
            chunk_size = self.chunk_size,
            rounds,
            "Starting batch"
        );

        let mut result = BatchResult::new();

        for (index, chunk) in ids.chunks(self.chunk_size).enumerate() {
            let round = index + 1;
            debug!(round, rounds, items = chunk.len(), "Dispatching chunk");

            let settled = join_all(chunk.iter().map(|id| {
                let pending = fetch(id.clone());
                let id = id.clone();
                async move { (id, pending.await) }
            }))
            .await;

            for (id, outcome) in settled {
                match outcome {
                    Ok(value) => result.push_success(id, value),
                    Err(err) => {
                        warn!(id = %id, error = %err, "Batch item failed");
                        result.push_failure(id, err.reason());
                    }
                }
            }

            result.rounds += 1;
            debug!(round, rounds, "Chunk collected");
        }

        info!(
            succeeded = result.successes.len(),
            failed = result.failures.len(),
            rounds = result.rounds,
            "Batch completed"
        );
        result
    }

    // == Preload ==
    /// Discovers the ids to fetch, then runs them as a batch to warm the cache.
    ///
    /// Fails only when discovery fails, in which case no fetch is started.
    /// Item failures are reported in the returned result and logged.
    pub async fn preload<I, V, D, F, Fut>(&self, discover: D, fetch: F) -> Result<BatchResult<I, V>>
    where
        I: Clone + Display,
        D: Future<Output = Result<Vec<I>>>,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let ids = match discover.await {
            Ok(ids) => ids,
            Err(err) => {
                error!(error = %err, "Preload failed: could not discover items");
                return Err(err);
            }
        };

        let result = self.run_batch(&ids, fetch).await;
        if result.has_failures() {
            warn!("Preload finished with failures: {}", result.summary());
        } else {
            info!("Preload finished: {}", result.summary());
        }

        Ok(result)
    }
}
