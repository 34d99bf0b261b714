//! Server-side browsing with latest-wins refetching

use chrono::DateTime;
use chrono::Utc;
use tablekit::GotoPageError;
use tablekit::PageToken;
use tablekit::SortState;
use tablekit::page_range;
use tablekit::parse_goto;

use crate::StoreClient;
use crate::api::FetchSequencer;
use crate::api::query::ListQuery;
use crate::api::query::Page;
use crate::api::query::StatusParam;
use crate::auth::Role;
use crate::error::Error;
use crate::model::Record;

/// A table whose filtering, sorting, and paging happen server-side.
///
/// Holds the list parameters and the last page the server returned. Any
/// change to the search term, status filter, date range, or page size
/// resets the cursor to page 1 and refetches; navigation clamps against
/// the server-reported total and refetches. Every refetch goes through a
/// [`FetchSequencer`], so when requests overlap the last one *issued*
/// wins — a slow stale response is discarded instead of overwriting newer
/// rows.
///
/// Explicit "go to page" input is validated through [`RemoteBrowser::parse_goto`]
/// rather than clamped; implicit navigation (`next_page`, `previous_page`,
/// `select_page`) clamps silently. That asymmetry is deliberate: typed
/// input deserves feedback, button presses deserve forgiveness.
///
/// # Example
///
/// ```ignore
/// let mut browser = RemoteBrowser::new(client, "/admin/orders", 25)
///     .role(Role::Admin);
///
/// browser.refresh().await?;
/// browser.set_search("hex bolt").await?;
///
/// for record in browser.rows() {
///     println!("{:?}", record.get_string("reference"));
/// }
/// for token in browser.page_tokens(1) {
///     print!("[{}] ", token);
/// }
/// ```
pub struct RemoteBrowser {
    client: StoreClient,
    path: String,
    required_role: Option<Role>,

    search_term: String,
    status: Option<&'static str>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    sort: Option<SortState>,
    page: u32,
    page_size: u32,

    current: Option<Page<Record>>,
    sequencer: FetchSequencer,
    loading: bool,
}

impl RemoteBrowser {
    /// Creates a browser over a list endpoint path like `/admin/orders`.
    ///
    /// Nothing is fetched until the first [`refresh`](Self::refresh).
    pub fn new(client: StoreClient, path: impl Into<String>, page_size: u32) -> Self {
        Self {
            client,
            path: path.into(),
            required_role: None,
            search_term: String::new(),
            status: None,
            start_date: None,
            end_date: None,
            sort: None,
            page: 1,
            page_size: page_size.max(1),
            current: None,
            sequencer: FetchSequencer::new(),
            loading: false,
        }
    }

    /// Declares the role the endpoint requires (builder pattern).
    pub fn role(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    /// Refetches the current page with the current parameters.
    ///
    /// If a newer refresh supersedes this one while the request is in
    /// flight, the stale response is discarded and state is untouched.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let ticket = self.sequencer.begin();
        self.loading = true;

        let url = format!(
            "{}{}",
            self.client.endpoint_url(&self.path),
            self.build_query().to_query_string()
        );

        let outcome = tokio::select! {
            _ = ticket.token().cancelled() => {
                // Superseded before resolving; the newer refresh owns the
                // loading flag now.
                return Ok(());
            }
            result = self.client.get_json::<Page<Record>>(&url, self.required_role) => result,
        };

        match ticket.accept(outcome) {
            Ok(result) => {
                self.loading = false;
                let page = result?;
                // The server may clamp the cursor itself (shrunken result
                // set); trust its reported page.
                self.page = page.page().max(1);
                self.current = Some(page);
                Ok(())
            }
            Err(_) => Ok(()),
        }
    }

    /// Sets the search term; a change resets to page 1 and refetches.
    pub async fn set_search(&mut self, term: impl Into<String>) -> Result<(), Error> {
        let term = term.into();
        if term == self.search_term {
            return Ok(());
        }
        self.search_term = term;
        self.page = 1;
        self.refresh().await
    }

    /// Sets or clears the status filter; resets to page 1 and refetches.
    pub async fn set_status<S: StatusParam>(&mut self, status: Option<S>) -> Result<(), Error> {
        self.status = status.map(|s| s.wire_name());
        self.page = 1;
        self.refresh().await
    }

    /// Sets or clears the date-range filter; resets to page 1 and refetches.
    pub async fn set_range(
        &mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(), Error> {
        self.start_date = start;
        self.end_date = end;
        self.page = 1;
        self.refresh().await
    }

    /// Sets the page size; a change resets to page 1 and refetches.
    pub async fn set_page_size(&mut self, page_size: u32) -> Result<(), Error> {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return Ok(());
        }
        self.page_size = page_size;
        self.page = 1;
        self.refresh().await
    }

    /// Advances the sort cycle for a column header click and refetches.
    ///
    /// The sort is forwarded to the server; the cursor stays where it is,
    /// since sorting reorders the result set without shrinking it.
    pub async fn toggle_sort(&mut self, key: &str) -> Result<(), Error> {
        self.sort = SortState::cycle(self.sort.as_ref(), key);
        self.refresh().await
    }

    /// Moves to the given page, clamping silently, and refetches.
    pub async fn select_page(&mut self, page: u32) -> Result<(), Error> {
        let clamped = page.clamp(1, self.total_pages());
        if clamped == self.page && self.current.is_some() {
            return Ok(());
        }
        self.page = clamped;
        self.refresh().await
    }

    /// Moves to the previous page, stopping at page 1.
    pub async fn previous_page(&mut self) -> Result<(), Error> {
        self.select_page(self.page.saturating_sub(1)).await
    }

    /// Moves to the next page, stopping at the last page.
    pub async fn next_page(&mut self) -> Result<(), Error> {
        self.select_page(self.page.saturating_add(1)).await
    }

    /// Validates free-text "go to page" input against the server total.
    ///
    /// This is the submit-enabled predicate: on `Err` the control disables
    /// its action instead of clamping. Apply a valid page with
    /// [`select_page`](Self::select_page).
    pub fn parse_goto(&self, input: &str) -> Result<u32, GotoPageError> {
        parse_goto(input, self.total_pages())
    }

    /// Returns the rows of the current page, in server order.
    pub fn rows(&self) -> &[Record] {
        self.current.as_ref().map_or(&[], |p| p.items())
    }

    /// Returns the pager tokens for the current state.
    pub fn page_tokens(&self, sibling_count: u32) -> Vec<PageToken> {
        let total = self.total_pages();
        page_range(self.page.clamp(1, total), total, sibling_count)
    }

    /// Returns `true` while a refetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the current page (1-based).
    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Returns the server-reported page count, or 1 before the first fetch.
    pub fn total_pages(&self) -> u32 {
        self.current.as_ref().map_or(1, |p| p.total_pages())
    }

    /// Returns the server-reported total item count.
    pub fn total_items(&self) -> u64 {
        self.current.as_ref().map_or(0, |p| p.total_items())
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the active search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    fn build_query(&self) -> ListQuery {
        let mut query = ListQuery::new().page(self.page).limit(self.page_size);

        if !self.search_term.trim().is_empty() {
            query = query.search(self.search_term.clone());
        }
        if let Some(status) = self.status {
            query = query.status_name(status);
        }
        if let Some(start) = self.start_date {
            query = query.since(start);
        }
        if let Some(end) = self.end_date {
            query = query.until(end);
        }
        if let Some(state) = &self.sort {
            query = query.sort(state.key.clone(), state.direction);
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticSessionProvider;

    fn browser() -> RemoteBrowser {
        let client = StoreClient::builder()
            .url("https://shop.invalid")
            .session_provider(StaticSessionProvider::new("token"))
            .build();
        RemoteBrowser::new(client, "/admin/orders", 25)
    }

    #[test]
    fn test_defaults_before_first_fetch() {
        let browser = browser();
        assert_eq!(browser.current_page(), 1);
        assert_eq!(browser.total_pages(), 1);
        assert_eq!(browser.total_items(), 0);
        assert!(browser.rows().is_empty());
        assert!(!browser.is_loading());
    }

    #[test]
    fn test_goto_validation_against_server_total() {
        let mut browser = browser();
        browser.current = Some(Page::new(vec![], 1, 25, 100));

        assert_eq!(browser.parse_goto("3"), Ok(3));
        assert_eq!(
            browser.parse_goto("5"),
            Err(GotoPageError::OutOfRange {
                requested: 5,
                total_pages: 4
            })
        );
        assert!(matches!(
            browser.parse_goto("last"),
            Err(GotoPageError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_query_reflects_parameters() {
        let mut browser = browser();
        browser.search_term = "bolt".to_string();
        browser.page = 2;
        browser.sort = Some(SortState::desc("createdAt"));

        assert_eq!(
            browser.build_query().to_query_string(),
            "?page=2&limit=25&search=bolt&sortBy=createdAt&sortDir=desc"
        );
    }

    #[test]
    fn test_page_tokens_use_server_total() {
        let mut browser = browser();
        browser.current = Some(Page::new(vec![], 1, 25, 500));
        let tokens = browser.page_tokens(1);
        assert_eq!(tokens.first(), Some(&PageToken::Page(1)));
        assert_eq!(tokens.last(), Some(&PageToken::Page(20)));
    }
}
