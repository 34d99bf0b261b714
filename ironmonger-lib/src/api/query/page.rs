//! Page type for paginated list results

use serde::Deserialize;

/// One page of a server-paginated listing.
///
/// List endpoints return their items in an envelope carrying the page
/// cursor and the total result count, which is everything a pager needs.
///
/// # Example
///
/// ```ignore
/// let page = client.orders(&ListQuery::new().page(1).limit(20)).await?.into_inner();
///
/// for record in page.items() {
///     println!("{:?}", record.get_string("reference"));
/// }
///
/// if page.has_more() {
///     println!("{} pages total", page.total_pages());
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    #[serde(rename = "data")]
    items: Vec<T>,
    /// The 1-based page number this envelope holds.
    page: u32,
    /// The page size the server applied.
    limit: u32,
    /// Total matching items across all pages.
    total: u64,
}

impl<T> Page<T> {
    /// Creates a page, for composing test fixtures and local sources.
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        Self {
            items,
            page,
            limit,
            total,
        }
    }

    /// Returns a reference to the items in this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size the server applied.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the total matching items across all pages.
    pub fn total_items(&self) -> u64 {
        self.total
    }

    /// Returns the total page count, never less than 1.
    pub fn total_pages(&self) -> u32 {
        let limit = self.limit.max(1) as u64;
        (self.total.div_ceil(limit).max(1)).min(u32::MAX as u64) as u32
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are pages after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u32> = Page::new(vec![], 1, 20, 45);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_floors_at_one() {
        let page: Page<u32> = Page::new(vec![], 1, 20, 0);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_more());
    }

    #[test]
    fn test_has_more() {
        let first: Page<u32> = Page::new(vec![1, 2], 1, 2, 5);
        assert!(first.has_more());

        let last: Page<u32> = Page::new(vec![5], 3, 2, 5);
        assert!(!last.has_more());
    }

    #[test]
    fn test_deserializes_from_envelope() {
        let json = r#"{"data": [1, 2, 3], "page": 2, "limit": 3, "total": 7}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items(), &[1, 2, 3]);
        assert_eq!(page.page(), 2);
        assert_eq!(page.total_pages(), 3);
    }
}
