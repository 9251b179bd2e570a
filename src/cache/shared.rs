//! Shared Cache Handle
//!
//! Thread-safe handle around a [`CacheStore`]. Every operation takes the same
//! lock and never awaits, so `set`'s check-evict-insert sequence is atomic with
//! respect to concurrent callers.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheConfig, CacheStats, CacheStore, Clock};

/// Cloneable handle to one cache store.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self::from_store(CacheStore::new(config))
    }

    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self::from_store(CacheStore::with_clock(config, clock))
    }

    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn config(&self) -> CacheConfig {
        *self.inner.lock().config()
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.inner.lock().set(key, value);
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    /// Drops every entry, returning the live count from the same locked call.
    pub fn clear(&self) -> usize {
        self.inner.lock().clear()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let cache: SharedCache<u32> = SharedCache::new(CacheConfig::default());
        let other = cache.clone();

        cache.set("a", 1);
        assert_eq!(other.get("a"), Some(1));

        other.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_sets_respect_capacity() {
        let config = CacheConfig {
            max_size: 8,
            ..CacheConfig::default()
        };
        let cache: SharedCache<usize> = SharedCache::new(config);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.set(format!("t{}-{}", t, i), i);
                        assert!(cache.len() <= 8);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.stats().size, 8);
    }
}
