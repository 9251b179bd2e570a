//! API Catalog Gateway - A caching front for a remote API catalog
//!
//! Serves interface listings, details and categories through a read-through
//! cache with TTL expiration and FIFO eviction, and fetches many details at
//! once in bounded concurrent chunks.

pub mod api;
pub mod batch;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use tasks::spawn_cleanup_task;
