//! Provenance for cacheable reads

use chrono::DateTime;
use chrono::Utc;

/// A payload plus where and when it came from.
///
/// Catalog reads may be replayed from the response cache instead of
/// hitting the server, and a storefront wants to say so — grey out a
/// stale price, show "updated 2 minutes ago", offer a refresh. This
/// wrapper carries exactly that: the fetch instant and whether the bytes
/// were replayed.
///
/// # Example
///
/// ```ignore
/// let products = client.products(&query).await?;
///
/// if products.is_replayed() {
///     banner(format!("showing results from {}s ago", products.age().num_seconds()));
/// }
///
/// render(products.into_inner());
/// ```
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    data: T,
    fetched_at: DateTime<Utc>,
    replayed: bool,
}

impl<T> Fetched<T> {
    /// Wraps a payload just read from the server.
    pub fn fresh(data: T) -> Self {
        Self::fresh_at(data, Utc::now())
    }

    /// Wraps a payload read from the server at the given instant.
    pub fn fresh_at(data: T, fetched_at: DateTime<Utc>) -> Self {
        Self {
            data,
            fetched_at,
            replayed: false,
        }
    }

    /// Wraps a payload replayed from the cache, keeping its original
    /// fetch instant.
    pub fn replayed(data: T, fetched_at: DateTime<Utc>) -> Self {
        Self {
            data,
            fetched_at,
            replayed: true,
        }
    }

    /// Returns `true` if the payload came from the cache rather than the
    /// server.
    pub fn is_replayed(&self) -> bool {
        self.replayed
    }

    /// Returns when the payload was originally read from the server.
    ///
    /// For replayed data this is the original fetch, not the replay.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Returns how old the payload is right now.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.fetched_at)
    }

    /// Returns a reference to the payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the wrapper and returns the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_is_not_replayed() {
        let fetched = Fetched::fresh(vec![1, 2, 3]);
        assert!(!fetched.is_replayed());
        assert_eq!(fetched.data(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_replayed_keeps_the_original_fetch_instant() {
        let original = Utc::now() - chrono::Duration::minutes(3);
        let fetched = Fetched::replayed("body", original);

        assert!(fetched.is_replayed());
        assert_eq!(fetched.fetched_at(), original);
        assert!(fetched.age() >= chrono::Duration::minutes(3));
        assert_eq!(fetched.into_inner(), "body");
    }
}
