//! Product catalog operations

use reqwest::Method;
use uuid::Uuid;

use crate::Fetched;
use crate::StoreClient;
use crate::auth::Role;
use crate::cache::StoredResponse;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Record;

use super::query::ListPages;
use super::query::ListQuery;
use super::query::Page;

impl StoreClient {
    /// Lists products, replaying a recent response when one is young enough.
    ///
    /// The catalog is the one surface every visitor hammers and the one
    /// that changes rarely, so listings are replayed per query under the
    /// age limit in [`CacheConfig::catalog_ttl`](crate::cache::CacheConfig).
    pub async fn products(&self, query: &ListQuery) -> Result<Fetched<Page<Record>>, Error> {
        let key = format!("catalog{}", query.to_query_string());
        let url = format!("{}{}", self.endpoint_url("/products"), query.to_query_string());
        self.replayable_get(&key, &url, self.cache_config().catalog_ttl)
            .await
    }

    /// Returns an async iterator over every catalog page.
    pub fn product_pages(&self, query: &ListQuery) -> ListPages<'_, Record> {
        ListPages::new(self, "/products", query, None)
    }

    /// Retrieves a single product, replaying a recent response when one is
    /// young enough.
    pub async fn product(&self, id: Uuid) -> Result<Fetched<Record>, Error> {
        let key = format!("product/{}", id);
        let url = self.endpoint_url(&format!("/products/{}", id));
        self.replayable_get(&key, &url, self.cache_config().record_ttl)
            .await
    }

    /// Creates a product. Requires an admin session.
    pub async fn create_product(&self, product: &Record) -> Result<Record, Error> {
        let url = self.endpoint_url("/admin/products");
        let body = serde_json::to_string(product).map_err(|e| ApiError::parse(e.to_string()))?;
        let created = self
            .send_json(Method::POST, &url, Some(body), Some(Role::Admin))
            .await?;
        // A new product changes listings but has no cached detail yet.
        self.cache().evict("catalog").await;
        Ok(created)
    }

    /// Updates a product. Requires an admin session.
    pub async fn update_product(&self, id: Uuid, product: &Record) -> Result<Record, Error> {
        let url = self.endpoint_url(&format!("/admin/products/{}", id));
        let body = serde_json::to_string(product).map_err(|e| ApiError::parse(e.to_string()))?;
        let updated = self
            .send_json(Method::PUT, &url, Some(body), Some(Role::Admin))
            .await?;
        self.evict_product(id).await;
        Ok(updated)
    }

    /// Deletes a product. Requires an admin session.
    pub async fn delete_product(&self, id: Uuid) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("/admin/products/{}", id));
        self.request(Method::DELETE, &url, None, Some(Role::Admin))
            .await?;
        self.evict_product(id).await;
        Ok(())
    }

    /// Fetches a URL, replaying a stored response younger than `max_age`.
    ///
    /// Replays deserialize the stored wire bytes, so a hit sees exactly
    /// what a live read would have. A zero age limit bypasses the cache
    /// entirely.
    async fn replayable_get<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        url: &str,
        max_age: std::time::Duration,
    ) -> Result<Fetched<T>, Error> {
        if max_age.is_zero() {
            return Ok(Fetched::fresh(self.get_json(url, None).await?));
        }

        if let Some(stored) = self.cache().replay(key, max_age).await {
            let data = serde_json::from_str(&stored.body)
                .map_err(|e| ApiError::parse_with_body(e.to_string(), stored.body.clone()))?;
            return Ok(Fetched::replayed(data, stored.fetched_at));
        }

        let body = self.get_text(url, None).await?;
        let data = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.clone()))?;

        let stored = StoredResponse::fetched_now(body);
        let fetched_at = stored.fetched_at;
        self.cache().record(key, stored).await;

        Ok(Fetched::fresh_at(data, fetched_at))
    }

    /// Drops replayable state touched by a product write.
    ///
    /// Listing keys vary by query string, so the whole `catalog` prefix
    /// goes; other surfaces keep their entries.
    async fn evict_product(&self, id: Uuid) {
        self.cache().evict(&format!("product/{}", id)).await;
        self.cache().evict("catalog").await;
    }
}
