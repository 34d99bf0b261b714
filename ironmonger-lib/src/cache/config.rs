//! Cache configuration

use std::time::Duration;

/// Configuration for cache TTL (time-to-live) settings.
///
/// Controls how long different types of data are cached before expiring.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ironmonger_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_catalog_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for catalog listings.
    ///
    /// Default: 5 minutes
    pub catalog_ttl: Duration,

    /// TTL for individual record retrievals.
    ///
    /// Default: 5 minutes
    pub record_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            catalog_ttl: Duration::from_secs(300),
            record_ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the catalog listing TTL.
    pub fn with_catalog_ttl(mut self, ttl: Duration) -> Self {
        self.catalog_ttl = ttl;
        self
    }

    /// Sets the record TTL.
    pub fn with_record_ttl(mut self, ttl: Duration) -> Self {
        self.record_ttl = ttl;
        self
    }

    /// Creates a config with no caching (zero TTLs).
    pub fn no_cache() -> Self {
        Self {
            catalog_ttl: Duration::ZERO,
            record_ttl: Duration::ZERO,
        }
    }
}
