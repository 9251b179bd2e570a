//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, insertion-order eviction and
//! a read-through fetcher keyed by operation name and arguments.

mod clock;
mod entry;
mod fetcher;
mod fifo;
mod key;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use fetcher::{Cached, CachedFetcher};
pub use fifo::InsertionOrder;
pub use key::cache_key;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{CacheConfig, CacheStore, DEFAULT_MAX_SIZE, DEFAULT_TTL};
