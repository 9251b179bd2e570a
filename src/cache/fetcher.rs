//! Read-Through Fetcher
//!
//! Wraps asynchronous fetch operations with a cache lookup. Successful results
//! are stored under a key derived from the operation name and its arguments;
//! failures are returned unchanged and never stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::cache::{cache_key, SharedCache};
use crate::error::Result;

/// One in-progress origin call shared by every caller that missed on its key.
type Flight<V> = Arc<OnceCell<Result<V>>>;

// == Cached Fetcher ==
/// Read-through cache in front of arbitrary async fetches.
///
/// Concurrent misses on the same key are coalesced by default: the first caller
/// performs the fetch and the others wait for its result, success or failure.
#[derive(Debug)]
pub struct CachedFetcher<V> {
    cache: SharedCache<V>,
    in_flight: Arc<Mutex<HashMap<String, Flight<V>>>>,
    coalesce: bool,
}

impl<V> Clone for CachedFetcher<V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            in_flight: Arc::clone(&self.in_flight),
            coalesce: self.coalesce,
        }
    }
}

impl<V: Clone> CachedFetcher<V> {
    pub fn new(cache: SharedCache<V>) -> Self {
        Self {
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            coalesce: true,
        }
    }

    /// Enables or disables coalescing of concurrent identical misses.
    pub fn coalesce(mut self, enabled: bool) -> Self {
        self.coalesce = enabled;
        self
    }

    pub fn cache(&self) -> &SharedCache<V> {
        &self.cache
    }

    // == Fetch ==
    /// Returns the cached value for `operation(args)`, or runs `fetch` and caches
    /// its result.
    pub async fn fetch<A, F, Fut>(&self, operation: &str, args: &A, fetch: F) -> Result<V>
    where
        A: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let key = cache_key(operation, args)?;
        self.fetch_keyed(key, fetch).await
    }

    /// Same as [`fetch`](Self::fetch) with a precomputed key.
    pub async fn fetch_keyed<F, Fut>(&self, key: String, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.cache.get(&key) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }
        debug!(key = %key, "cache miss");

        if !self.coalesce {
            return self.load(&key, fetch).await;
        }

        let guard = FlightGuard {
            flight: {
                let mut in_flight = self.in_flight.lock();
                Arc::clone(in_flight.entry(key.clone()).or_default())
            },
            in_flight: &self.in_flight,
            key: &key,
        };

        let result = guard
            .flight
            .get_or_init(|| self.load(&key, fetch))
            .await
            .clone();
        result
    }

    // == With Cache ==
    /// Wraps `fetch` so that calling the result behaves like `fetch(args)` with
    /// read-through caching under `operation`.
    pub fn with_cache<F>(&self, operation: impl Into<String>, fetch: F) -> Cached<V, F> {
        Cached {
            fetcher: self.clone(),
            operation: operation.into(),
            fetch,
        }
    }

    async fn load<F, Fut>(&self, key: &str, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let value = fetch().await?;
        self.cache.set(key, value.clone());
        Ok(value)
    }
}

// == Flight Guard ==
/// Unregisters a flight once it has settled, or once its last waiter is gone
/// without a result (the caller was cancelled).
struct FlightGuard<'a, V> {
    in_flight: &'a Mutex<HashMap<String, Flight<V>>>,
    key: &'a str,
    flight: Flight<V>,
}

impl<V> Drop for FlightGuard<'_, V> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock();
        // One reference in the table plus ours means nobody else is waiting
        let abandoned = Arc::strong_count(&self.flight) == 2;
        if (self.flight.initialized() || abandoned)
            && in_flight
                .get(self.key)
                .is_some_and(|current| Arc::ptr_eq(current, &self.flight))
        {
            in_flight.remove(self.key);
        }
    }
}

// == Cached ==
/// A fetch function bound to an operation name and a cache.
#[derive(Debug, Clone)]
pub struct Cached<V, F> {
    fetcher: CachedFetcher<V>,
    operation: String,
    fetch: F,
}

impl<V: Clone, F> Cached<V, F> {
    /// Calls the wrapped fetch through the cache.
    pub async fn call<A, Fut>(&self, args: A) -> Result<V>
    where
        A: Serialize,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let key = cache_key(&self.operation, &args)?;
        self.fetcher.fetch_keyed(key, || (self.fetch)(args)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::cache::{CacheConfig, ManualClock};
    use crate::error::CatalogError;

    fn fetcher() -> CachedFetcher<String> {
        CachedFetcher::new(SharedCache::new(CacheConfig::default()))
    }

    #[tokio::test]
    async fn test_hit_skips_fetch() {
        let fetcher = fetcher();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for _ in 0..3 {
            let value = fetcher
                .fetch("detail", &(7u64,), || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok("seven".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "seven");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fetcher.cache().stats().size, 1);
    }

    #[tokio::test]
    async fn test_distinct_args_are_distinct_entries() {
        let fetcher = fetcher();

        let a = fetcher
            .fetch("detail", &(1u64,), || async { Ok("one".to_string()) })
            .await
            .unwrap();
        let b = fetcher
            .fetch("detail", &(2u64,), || async { Ok("two".to_string()) })
            .await
            .unwrap();

        assert_eq!(a, "one");
        assert_eq!(b, "two");
        assert_eq!(fetcher.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_propagated_and_not_cached() {
        let fetcher = fetcher();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for _ in 0..2 {
            let err = fetcher
                .fetch("detail", &(404u64,), || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(CatalogError::Origin {
                        code: 404,
                        message: "not found".to_string(),
                    })
                })
                .await
                .unwrap_err();
            assert_eq!(
                err,
                CatalogError::Origin {
                    code: 404,
                    message: "not found".to_string()
                }
            );
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let fetcher: CachedFetcher<u32> = CachedFetcher::new(SharedCache::new(config));
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for _ in 0..3 {
            fetcher
                .fetch("op", &(), || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(1)
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(fetcher.cache().stats().size, 0);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let clock = Arc::new(ManualClock::new(0));
        let config = CacheConfig {
            ttl: Duration::from_millis(100),
            ..CacheConfig::default()
        };
        let fetcher: CachedFetcher<u32> =
            CachedFetcher::new(SharedCache::with_clock(config, clock.clone()));
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let fetch = || async move { Ok(counter.fetch_add(1, Ordering::SeqCst) as u32) };

        assert_eq!(fetcher.fetch("op", &(), fetch).await.unwrap(), 0);
        clock.set(99);
        assert_eq!(fetcher.fetch("op", &(), fetch).await.unwrap(), 0);
        clock.set(100);
        assert_eq!(fetcher.fetch("op", &(), fetch).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_with_cache_adapter() {
        let fetcher = fetcher();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let cached = fetcher.with_cache("echo", move |(id, label): (u64, String)| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(format!("{}-{}", id, label))
            }
        });

        assert_eq!(cached.call((1, "a".to_string())).await.unwrap(), "1-a");
        assert_eq!(cached.call((1, "a".to_string())).await.unwrap(), "1-a");
        assert_eq!(cached.call((1, "b".to_string())).await.unwrap(), "1-b");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_are_coalesced() {
        let fetcher = fetcher();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let slow = || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok("value".to_string())
        };
        let args = (1,);

        let (a, b, c) = tokio::join!(
            fetcher.fetch("op", &args, slow),
            fetcher.fetch("op", &args, slow),
            fetcher.fetch("op", &args, slow),
        );

        assert_eq!(a.unwrap(), "value");
        assert_eq!(b.unwrap(), "value");
        assert_eq!(c.unwrap(), "value");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(fetcher.in_flight.lock().is_empty());
    }

    #[tokio::test]
    async fn test_coalesced_failure_reaches_every_caller() {
        let fetcher = fetcher();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let failing = || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err::<String, _>(CatalogError::Transport {
                message: "connection reset".to_string(),
                timed_out: false,
            })
        };

        let args = (1,);

        let (a, b) = tokio::join!(
            fetcher.fetch("op", &args, failing),
            fetcher.fetch("op", &args, failing),
        );

        assert!(matches!(a, Err(CatalogError::Transport { .. })));
        assert!(matches!(b, Err(CatalogError::Transport { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(fetcher.cache().is_empty());
        assert!(fetcher.in_flight.lock().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_fetch_leaves_no_flight_behind() {
        let fetcher = fetcher();
        let args = (9u64,);

        let stalled = tokio::time::timeout(
            Duration::from_millis(20),
            fetcher.fetch("detail", &args, std::future::pending::<Result<String>>),
        )
        .await;

        assert!(stalled.is_err());
        assert!(fetcher.in_flight.lock().is_empty());

        // The key can be fetched normally afterwards
        let value = fetcher
            .fetch("detail", &args, || async { Ok("nine".to_string()) })
            .await
            .unwrap();
        assert_eq!(value, "nine");
        assert!(fetcher.in_flight.lock().is_empty());
    }

    #[tokio::test]
    async fn test_without_coalescing_each_miss_fetches() {
        let fetcher = fetcher().coalesce(false);
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let slow = || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok("value".to_string())
        };
        let args = (1,);

        let (a, b) = tokio::join!(
            fetcher.fetch("op", &args, slow),
            fetcher.fetch("op", &args, slow),
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
