//! Cache Statistics Module
//!
//! Snapshot of the cache's live contents plus lifetime hit/miss/eviction counters.

use serde::Serialize;

// == Cache Stats ==
/// Cache contents and performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of live entries
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Configured TTL in milliseconds
    pub ttl_ms: u64,
    /// Whether caching is enabled
    pub enabled: bool,
    /// Live keys, oldest insertion first
    pub keys: Vec<String>,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of live entries evicted to respect capacity
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates an empty snapshot for the given configuration.
    pub fn new(max_size: usize, ttl_ms: u64, enabled: bool) -> Self {
        Self {
            max_size,
            ttl_ms,
            enabled,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
