//! Async iterator over paginated list results

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::StoreClient;
use crate::auth::Role;
use crate::error::Error;

use super::ListQuery;
use super::Page;

/// Async iterator that yields pages from a list endpoint.
///
/// Fetches page 1 (or the page set on the base query) and walks forward
/// until the server-reported total is exhausted. The first error ends the
/// iteration.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.order_pages(&ListQuery::new().limit(50));
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for record in page.items() {
///         println!("{:?}", record.get_string("reference"));
///     }
/// }
/// ```
pub struct ListPages<'a, T> {
    client: &'a StoreClient,
    path: String,
    query: ListQuery,
    required_role: Option<Role>,
    next_page: u32,
    done: bool,
    _marker: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> ListPages<'a, T> {
    pub(crate) fn new(
        client: &'a StoreClient,
        path: impl Into<String>,
        query: &ListQuery,
        required_role: Option<Role>,
    ) -> Self {
        let query = query.clone();
        let next_page = query.page_value().unwrap_or(1);
        Self {
            client,
            path: path.into(),
            query,
            required_role,
            next_page,
            done: false,
            _marker: PhantomData,
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<Page<T>, Error>> {
        if self.done {
            return None;
        }

        let query = self.query.clone().page(self.next_page);
        let url = format!(
            "{}{}",
            self.client.endpoint_url(&self.path),
            query.to_query_string()
        );

        match self
            .client
            .get_json::<Page<T>>(&url, self.required_role)
            .await
        {
            Ok(page) => {
                if page.page() >= page.total_pages() {
                    self.done = true;
                } else {
                    self.next_page = page.page() + 1;
                }
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    /// Drains every remaining page and returns the items in order.
    pub async fn collect_all(mut self) -> Result<Vec<T>, Error> {
        let mut items = Vec::new();
        while let Some(page) = self.next().await {
            items.extend(page?.into_items());
        }
        Ok(items)
    }
}
