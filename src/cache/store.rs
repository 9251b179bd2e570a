//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking and
//! TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};

/// Default time-to-live for entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default maximum number of entries.
pub const DEFAULT_MAX_SIZE: usize = 100;

// == Cache Config ==
/// Store configuration, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of every entry
    pub ttl: Duration,
    /// Maximum number of entries held at once
    pub max_size: usize,
    /// When false the store keeps nothing and every read misses
    pub enabled: bool,
}

impl CacheConfig {
    /// TTL in milliseconds, saturating at `u64::MAX`.
    pub fn ttl_ms(&self) -> u64 {
        u64::try_from(self.ttl.as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_size: DEFAULT_MAX_SIZE,
            enabled: true,
        }
    }
}

// == Cache Store ==
/// Key-value storage with per-entry expiry and FIFO capacity eviction.
///
/// The store is synchronous; share it across tasks through
/// [`SharedCache`](crate::cache::SharedCache).
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order used to pick eviction victims
    order: InsertionOrder,
    /// Lifetime counters
    stats: CacheStats,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore using the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(config.max_size, config.ttl_ms(), config.enabled),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None when caching is disabled, the key is absent, or the entry has
    /// expired. Expired entries found here are removed.
    pub fn get(&mut self, key: &str) -> Option<V> {
        if !self.config.enabled {
            return None;
        }

        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            debug!(key, "cache entry expired");
        }
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value under `key`, resetting its timestamps if it already exists.
    ///
    /// When the store is at capacity, the entry with the oldest creation time is
    /// evicted first, even if `key` is already present (it may be the one
    /// evicted). With a capacity of zero nothing is stored.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        if !self.config.enabled {
            return;
        }

        let key = key.into();
        if self.config.max_size == 0 {
            debug!(key = %key, "cache capacity is zero, skipping insert");
            return;
        }

        if self.entries.len() >= self.config.max_size {
            if let Some(evicted_key) = self.order.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                debug!(evicted = %evicted_key, "evicted oldest cache entry");
            }
        }

        let entry = CacheEntry::new(value, self.clock.now_ms(), self.config.ttl_ms());
        self.entries.insert(key.clone(), entry);
        self.order.push(&key);
    }

    // == Delete ==
    /// Removes an entry by key, returning whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes every entry, returning how many of them were still live.
    pub fn clear(&mut self) -> usize {
        let now = self.clock.now_ms();
        let live = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count();

        self.entries.clear();
        self.order.clear();
        live
    }

    // == Stats ==
    /// Returns a snapshot of live contents and counters.
    ///
    /// Expired entries are swept first so the snapshot only reflects live entries.
    pub fn stats(&mut self) -> CacheStats {
        self.purge_expired();

        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats.keys = self.order.iter().cloned().collect();
        stats
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            true
        } else {
            false
        }
    }
}
