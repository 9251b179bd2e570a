//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::batch::DEFAULT_CHUNK_SIZE;
use crate::cache::{CacheConfig, DEFAULT_MAX_SIZE};
use crate::error::{CatalogError, Result};

/// Gateway configuration parameters.
///
/// Everything except the origin URL has a default.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the catalog origin, e.g. `https://catalog.example.com`
    pub origin_base_url: String,
    /// Project token sent to the origin
    pub origin_token: Option<String>,
    /// Origin request timeout in seconds
    pub request_timeout: u64,
    /// Cache entry lifetime in seconds
    pub cache_ttl: u64,
    /// Maximum number of cached entries
    pub cache_max_size: usize,
    /// Whether responses are cached at all
    pub cache_enabled: bool,
    /// Concurrent detail fetches per batch chunk
    pub batch_chunk_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CATALOG_BASE_URL` - Origin base URL (required)
    /// - `CATALOG_TOKEN` - Origin project token (optional)
    /// - `REQUEST_TIMEOUT` - Origin request timeout in seconds (default: 10)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 300)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_ENABLED` - true/false, 1/0, yes/no, on/off (default: true)
    /// - `BATCH_CHUNK_SIZE` - Concurrent fetches per chunk (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let origin_base_url = lookup("CATALOG_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CatalogError::Configuration("CATALOG_BASE_URL is required".to_string()))?;
        if !origin_base_url.starts_with("http://") && !origin_base_url.starts_with("https://") {
            return Err(CatalogError::Configuration(format!(
                "CATALOG_BASE_URL must start with http:// or https://, got '{}'",
                origin_base_url
            )));
        }

        let config = Self {
            origin_base_url,
            origin_token: lookup("CATALOG_TOKEN").filter(|v| !v.trim().is_empty()),
            request_timeout: parse_var(&lookup, "REQUEST_TIMEOUT", defaults.request_timeout)?,
            cache_ttl: parse_var(&lookup, "CACHE_TTL", defaults.cache_ttl)?,
            cache_max_size: parse_var(&lookup, "CACHE_MAX_SIZE", defaults.cache_max_size)?,
            cache_enabled: match lookup("CACHE_ENABLED") {
                Some(raw) => parse_bool("CACHE_ENABLED", &raw)?,
                None => defaults.cache_enabled,
            },
            batch_chunk_size: parse_var(&lookup, "BATCH_CHUNK_SIZE", defaults.batch_chunk_size)?,
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL", defaults.cleanup_interval)?,
        };

        if config.batch_chunk_size == 0 {
            return Err(CatalogError::Configuration(
                "BATCH_CHUNK_SIZE must be at least 1".to_string(),
            ));
        }
        if config.cleanup_interval == 0 {
            return Err(CatalogError::Configuration(
                "CLEANUP_INTERVAL must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// Cache settings derived from this configuration.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache_ttl),
            max_size: self.cache_max_size,
            enabled: self.cache_enabled,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CatalogError::Configuration(format!("{} has invalid value '{}'", name, raw))
        }),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CatalogError::Configuration(format!(
            "{} has invalid value '{}'",
            name, raw
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin_base_url: String::new(),
            origin_token: None,
            request_timeout: 10,
            cache_ttl: 300,
            cache_max_size: DEFAULT_MAX_SIZE,
            cache_enabled: true,
            batch_chunk_size: DEFAULT_CHUNK_SIZE,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
