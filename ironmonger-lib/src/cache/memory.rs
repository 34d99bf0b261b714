//! In-memory response replay

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::ResponseCache;
use super::StoredResponse;

/// The default replay backend: a process-local map of recent responses.
///
/// One entry per key. Entries linger until a fresh `record` replaces them
/// or a write evicts their prefix; there is no background sweeper. That
/// suits the access pattern here — the same handful of catalog keys are
/// asked for over and over, so a stale entry is overwritten by the very
/// read that found it too old.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, StoredResponse>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the number of stored responses, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn replay(&self, key: &str, max_age: Duration) -> Option<StoredResponse> {
        let now = Utc::now();
        // Staleness is per-caller, so a miss must not evict: a surface
        // with a looser age limit may still replay this entry.
        let entry = self.entries.get(key)?;
        if entry.is_fresh_at(now, max_age) {
            return Some(entry.value().clone());
        }
        None
    }

    async fn record(&self, key: &str, response: StoredResponse) {
        self.entries.insert(key.to_string(), response);
    }

    async fn evict(&self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(body: &str, seconds_old: i64) -> StoredResponse {
        StoredResponse {
            body: body.to_string(),
            fetched_at: Utc::now() - chrono::Duration::seconds(seconds_old),
        }
    }

    #[tokio::test]
    async fn test_replays_within_the_age_limit() {
        let cache = MemoryCache::new();
        cache.record("catalog?page=1", aged("[]", 30)).await;

        let hit = cache.replay("catalog?page=1", Duration::from_secs(60)).await;
        assert_eq!(hit.map(|r| r.body), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_staleness_is_per_caller() {
        let cache = MemoryCache::new();
        cache.record("product/1", aged("{}", 120)).await;

        // Too old for a 60s surface...
        assert!(cache.replay("product/1", Duration::from_secs(60)).await.is_none());
        // ...but still fine for a 300s one.
        assert!(cache.replay("product/1", Duration::from_secs(300)).await.is_some());
    }

    #[tokio::test]
    async fn test_evict_by_prefix_spares_other_surfaces() {
        let cache = MemoryCache::new();
        cache.record("catalog?page=1", aged("[]", 0)).await;
        cache.record("catalog?page=2&search=bolt", aged("[]", 0)).await;
        cache.record("product/42", aged("{}", 0)).await;

        cache.evict("catalog").await;

        assert!(cache.replay("catalog?page=1", Duration::MAX).await.is_none());
        assert!(cache.replay("catalog?page=2&search=bolt", Duration::MAX).await.is_none());
        assert!(cache.replay("product/42", Duration::MAX).await.is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_record_replaces_previous_entry() {
        let cache = MemoryCache::new();
        cache.record("product/1", aged("old", 500)).await;
        cache.record("product/1", aged("new", 0)).await;

        let hit = cache.replay("product/1", Duration::from_secs(60)).await;
        assert_eq!(hit.map(|r| r.body), Some("new".to_string()));
    }
}
