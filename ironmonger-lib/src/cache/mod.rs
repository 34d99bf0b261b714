//! Response replay for catalog reads
//!
//! The catalog is read on every storefront visit and written only when the
//! back office edits a product, so the client keeps the raw wire responses
//! it has already seen and replays them while they are young enough. An
//! entry records *when* it was fetched; *how old is too old* is the
//! caller's policy ([`CacheConfig`]), applied per surface at lookup time —
//! a listing grid and a product detail page can age the same entry
//! differently.
//!
//! Keys are namespaced by surface (`catalog?page=2…`, `product/<id>`), so a
//! product write can evict every listing by prefix without guessing which
//! query strings contained it.

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// A wire response as the server sent it, stamped with its fetch time.
///
/// The body is kept verbatim so a replay deserializes exactly what a live
/// read would have, and the stamp travels with the payload so frontends
/// can label replayed data ("updated 2 minutes ago").
#[derive(Debug, Clone)]
pub struct StoredResponse {
    /// The response body, verbatim.
    pub body: String,
    /// When the body was read from the server.
    pub fetched_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Stamps a body with the current time.
    pub fn fetched_now(body: String) -> Self {
        Self {
            body,
            fetched_at: Utc::now(),
        }
    }

    /// Returns `true` if the response is younger than `max_age` at `now`.
    ///
    /// A `max_age` too large to compare against (beyond what a date type
    /// can hold) never expires anything.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => now.signed_duration_since(self.fetched_at) <= max_age,
            Err(_) => true,
        }
    }
}

/// Trait for response replay backends.
///
/// Staleness is decided at lookup: `replay` takes the caller's age limit
/// and must return nothing older. Whether stale entries are dropped
/// eagerly or lazily is up to the implementation.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Returns the stored response for a key if it is younger than `max_age`.
    async fn replay(&self, key: &str, max_age: Duration) -> Option<StoredResponse>;

    /// Records a response under a key, replacing any previous entry.
    async fn record(&self, key: &str, response: StoredResponse);

    /// Drops every entry whose key starts with the given prefix.
    async fn evict(&self, prefix: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_freshness_is_an_age_limit() {
        let fetched = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let stored = StoredResponse {
            body: "{}".to_string(),
            fetched_at: fetched,
        };

        let two_minutes_later = fetched + chrono::Duration::minutes(2);
        assert!(stored.is_fresh_at(two_minutes_later, Duration::from_secs(300)));
        assert!(!stored.is_fresh_at(two_minutes_later, Duration::from_secs(60)));
    }

    #[test]
    fn test_unrepresentable_age_limit_never_expires() {
        let stored = StoredResponse::fetched_now("{}".to_string());
        assert!(stored.is_fresh_at(Utc::now(), Duration::MAX));
    }
}
