//! Query builder for paginated list endpoints

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use tablekit::Direction;

/// A status value usable as a list filter.
///
/// Implemented by the per-resource status enums (`OrderStatus`,
/// `EnquiryStatus`, `QuoteStatus`).
pub trait StatusParam {
    /// Returns the status name as it appears on the wire.
    fn wire_name(&self) -> &'static str;
}

/// Builder for the query string every paginated list endpoint accepts:
/// `?page=&limit=&search=&status=&startDate=&endDate=&sortBy=&sortDir=`.
///
/// Rendering is deterministic — parameters always appear in the same order —
/// so a query doubles as a cache key.
///
/// # Example
///
/// ```
/// use ironmonger_lib::api::query::ListQuery;
///
/// let query = ListQuery::new().page(2).limit(25).search("hammer");
/// assert_eq!(query.to_query_string(), "?page=2&limit=25&search=hammer");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    status: Option<&'static str>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    sort: Option<(String, Direction)>,
}

impl ListQuery {
    /// Creates an empty query (server defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the 1-based page to fetch.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the free-text search term.
    ///
    /// A term that trims to nothing is dropped entirely — an empty search
    /// matches everything, so it has no place on the wire.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Filters to a single status.
    pub fn status<S: StatusParam>(self, status: S) -> Self {
        self.status_name(status.wire_name())
    }

    /// Filters to an already-resolved status wire name.
    pub(crate) fn status_name(mut self, name: &'static str) -> Self {
        self.status = Some(name);
        self
    }

    /// Filters to records between the two instants, inclusive.
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filters to records at or after the given instant.
    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Filters to records at or before the given instant.
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Asks the server to sort on a field.
    pub fn sort(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some((key.into(), direction));
        self
    }

    /// Returns the page to fetch, if set.
    pub fn page_value(&self) -> Option<u32> {
        self.page
    }

    /// Returns the page size, if set.
    pub fn limit_value(&self) -> Option<u32> {
        self.limit
    }

    /// Renders the query string, starting with `?`, or an empty string when
    /// no parameter is set.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(search) = &self.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(status) = self.status {
            params.push(format!("status={}", status));
        }
        if let Some(start) = self.start_date {
            params.push(format!(
                "startDate={}",
                urlencoding::encode(&start.to_rfc3339_opts(SecondsFormat::Secs, true))
            ));
        }
        if let Some(end) = self.end_date {
            params.push(format!(
                "endDate={}",
                urlencoding::encode(&end.to_rfc3339_opts(SecondsFormat::Secs, true))
            ));
        }
        if let Some((key, direction)) = &self.sort {
            params.push(format!("sortBy={}", urlencoding::encode(key)));
            let dir = match direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            params.push(format!("sortDir={}", dir));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OrderStatus;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_empty_query_renders_nothing() {
        assert_eq!(ListQuery::new().to_query_string(), "");
    }

    #[test]
    fn test_parameter_order_is_deterministic() {
        let query = ListQuery::new()
            .search("hex bolt")
            .limit(50)
            .page(3)
            .status(OrderStatus::Shipped);
        assert_eq!(
            query.to_query_string(),
            "?page=3&limit=50&search=hex%20bolt&status=shipped"
        );
    }

    #[test]
    fn test_search_is_trimmed_and_encoded() {
        let query = ListQuery::new().search("  m8 & washers  ");
        assert_eq!(
            query.to_query_string(),
            "?search=m8%20%26%20washers"
        );

        // A whitespace-only term is no filter at all.
        let query = ListQuery::new().search("   ");
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_date_range_bounds() {
        let query = ListQuery::new().between(
            utc("2024-01-01T00:00:00Z"),
            utc("2024-01-31T23:59:59Z"),
        );
        assert_eq!(
            query.to_query_string(),
            "?startDate=2024-01-01T00%3A00%3A00Z&endDate=2024-01-31T23%3A59%3A59Z"
        );

        let query = ListQuery::new().since(utc("2024-06-01T00:00:00Z"));
        assert_eq!(
            query.to_query_string(),
            "?startDate=2024-06-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn test_sort_renders_key_and_direction() {
        let query = ListQuery::new().sort("createdAt", Direction::Desc);
        assert_eq!(query.to_query_string(), "?sortBy=createdAt&sortDir=desc");
    }
}
