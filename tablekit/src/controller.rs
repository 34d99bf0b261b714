//! Pagination controller owning table view state

use log::debug;
use uuid::Uuid;

use crate::column::TableSpec;
use crate::pager::PageToken;
use crate::pager::page_range;
use crate::rows::RowKey;
use crate::rows::RowSet;
use crate::sort::SortState;
use crate::view::visible_indices;

/// Error produced when validating explicit "go to page" input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GotoPageError {
    /// The input was empty.
    #[error("No page number entered")]
    Empty,

    /// The input did not parse as a page number.
    #[error("'{input}' is not a page number")]
    NotANumber { input: String },

    /// The page number is outside the valid range.
    #[error("Page {requested} is outside 1..={total_pages}")]
    OutOfRange { requested: u32, total_pages: u32 },
}

/// Validates free-text "go to page" input against the current page count.
///
/// Unlike Previous/Next and direct page clicks — which clamp silently —
/// explicit input is rejected rather than corrected, so the control can
/// disable its submit action and show the user what was wrong.
pub fn parse_goto(input: &str, total_pages: u32) -> Result<u32, GotoPageError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GotoPageError::Empty);
    }

    let page: u32 = trimmed.parse().map_err(|_| GotoPageError::NotANumber {
        input: trimmed.to_string(),
    })?;

    if page < 1 || page > total_pages {
        return Err(GotoPageError::OutOfRange {
            requested: page,
            total_pages,
        });
    }

    Ok(page)
}

/// Cached view derivation plus the inputs it was computed from.
#[derive(Debug)]
struct ViewCache {
    revision: u64,
    needle: String,
    sort: Option<SortState>,
    indices: Vec<usize>,
}

/// Stateful container for a client-side paginated table.
///
/// Owns the ingested rows, the active search term and sort, and the page
/// cursor. Derivations are recomputed only when their inputs change; the
/// memoization is an efficiency measure, results are identical either way.
///
/// Policy: changing the search term, the page size, or the backing rows
/// resets the cursor to page 1, so a shrinking result set can never strand
/// it out of range. Navigation (`previous_page`, `next_page`,
/// `select_page`) clamps silently; explicit "go to page" input is
/// validated through [`parse_goto`] instead.
///
/// # Example
///
/// ```
/// use tablekit::{Column, TableController, TableSpec};
///
/// let spec = TableSpec::new(vec![
///     Column::new("name", "Name", |s: &String| Some(s.as_str().into())),
/// ]).unwrap();
///
/// let mut table = TableController::new(spec, 10);
/// table.set_rows(vec!["anvil".to_string(), "bolt".to_string()], |_| None);
/// table.set_search("an");
/// assert_eq!(table.visible_page().len(), 1);
/// ```
#[derive(Debug)]
pub struct TableController<R> {
    spec: TableSpec<R>,
    rows: RowSet<R>,
    search_term: String,
    sort: Option<SortState>,
    current_page: u32,
    page_size: u32,
    view: Option<ViewCache>,
}

impl<R> TableController<R> {
    /// Creates an empty controller with the given columns and page size.
    ///
    /// A zero page size is treated as 1.
    pub fn new(spec: TableSpec<R>, page_size: u32) -> Self {
        Self {
            spec,
            rows: RowSet::empty(),
            search_term: String::new(),
            sort: None,
            current_page: 1,
            page_size: page_size.max(1),
            view: None,
        }
    }

    /// Returns the column set.
    pub fn spec(&self) -> &TableSpec<R> {
        &self.spec
    }

    /// Replaces the backing rows and resets to page 1.
    ///
    /// `id_of` supplies each row's stable identity; rows without one get a
    /// key synthesized at ingestion.
    pub fn set_rows(&mut self, rows: Vec<R>, id_of: impl Fn(&R) -> Option<Uuid>) {
        self.rows.replace(rows, id_of);
        self.current_page = 1;
    }

    /// Returns the active search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Sets the search term, resetting to page 1 on change.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.current_page = 1;
        }
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Advances the sort cycle for a click on the given column header.
    ///
    /// Sorting permutes the result set without changing its size, so the
    /// page cursor is left where it is.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = SortState::cycle(self.sort.as_ref(), key);
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sets the page size, resetting to page 1 on change.
    ///
    /// A zero page size is treated as 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.current_page = 1;
        }
    }

    /// Returns the number of rows matching the current search.
    pub fn total_items(&mut self) -> usize {
        self.ensure_view();
        self.view.as_ref().map_or(0, |v| v.indices.len())
    }

    /// Returns the page count for the current result set, never less than 1.
    pub fn total_pages(&mut self) -> u32 {
        let items = self.total_items() as u64;
        let size = self.page_size as u64;
        (items.div_ceil(size).max(1)).min(u32::MAX as u64) as u32
    }

    /// Returns the current page (1-based).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Moves to the previous page, stopping at page 1.
    pub fn previous_page(&mut self) {
        self.select_page(self.current_page.saturating_sub(1));
    }

    /// Moves to the next page, stopping at the last page.
    pub fn next_page(&mut self) {
        self.select_page(self.current_page.saturating_add(1));
    }

    /// Moves to the given page, clamping silently into range.
    pub fn select_page(&mut self, page: u32) {
        let total = self.total_pages();
        self.current_page = page.clamp(1, total);
    }

    /// Returns `true` if explicit navigation to the given page is allowed.
    ///
    /// This is the enabled-state predicate for a "go to page" submit
    /// action: out-of-range requests are refused here rather than clamped.
    pub fn can_goto(&mut self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    /// Validates and applies free-text "go to page" input.
    pub fn goto(&mut self, input: &str) -> Result<(), GotoPageError> {
        let total = self.total_pages();
        let page = parse_goto(input, total)?;
        self.current_page = page;
        Ok(())
    }

    /// Returns the key/row pairs visible on the current page, in order.
    pub fn visible_page(&mut self) -> Vec<&(RowKey, R)> {
        self.ensure_view();
        let Some(cache) = self.view.as_ref() else {
            return Vec::new();
        };

        let start = (self.current_page as usize - 1) * self.page_size as usize;
        let end = (start + self.page_size as usize).min(cache.indices.len());
        if start >= end {
            return Vec::new();
        }

        cache.indices[start..end]
            .iter()
            .filter_map(|&i| self.rows.entry(i))
            .collect()
    }

    /// Returns the pager tokens for the current state.
    pub fn page_tokens(&mut self, sibling_count: u32) -> Vec<PageToken> {
        let total = self.total_pages();
        let current = self.current_page.clamp(1, total);
        page_range(current, total, sibling_count)
    }

    /// Recomputes the derived view if its inputs changed.
    fn ensure_view(&mut self) {
        let needle = self.search_term.trim().to_lowercase();
        let up_to_date = self.view.as_ref().is_some_and(|v| {
            v.revision == self.rows.revision() && v.needle == needle && v.sort == self.sort
        });
        if up_to_date {
            return;
        }

        let indices = visible_indices(&self.rows, &self.spec, &self.search_term, self.sort.as_ref());
        debug!(
            "table view recomputed: {} of {} rows visible",
            indices.len(),
            self.rows.len()
        );
        self.view = Some(ViewCache {
            revision: self.rows.revision(),
            needle,
            sort: self.sort.clone(),
            indices,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn controller(n: usize, page_size: u32) -> TableController<String> {
        let spec = TableSpec::new(vec![Column::new("name", "Name", |s: &String| {
            Some(s.as_str().into())
        })])
        .unwrap();
        let mut table = TableController::new(spec, page_size);
        table.set_rows((0..n).map(|i| format!("item {i:03}")).collect(), |_| None);
        table
    }

    #[test]
    fn test_total_pages_rounds_up_and_floors_at_one() {
        let mut table = controller(45, 10);
        assert_eq!(table.total_pages(), 5);

        let mut empty = controller(0, 10);
        assert_eq!(empty.total_pages(), 1);
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut table = controller(100, 10);
        table.select_page(7);
        assert_eq!(table.current_page(), 7);

        table.set_page_size(25);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.total_pages(), 4);

        // Setting the same size again is not a change.
        table.select_page(3);
        table.set_page_size(25);
        assert_eq!(table.current_page(), 3);
    }

    #[test]
    fn test_search_change_resets_to_first_page() {
        let mut table = controller(100, 10);
        table.select_page(9);
        table.set_search("item 0");
        assert_eq!(table.current_page(), 1);

        // Re-setting the identical term keeps the cursor.
        table.select_page(2);
        table.set_search("item 0");
        assert_eq!(table.current_page(), 2);
    }

    #[test]
    fn test_sort_does_not_reset_page() {
        let mut table = controller(100, 10);
        table.select_page(4);
        table.toggle_sort("name");
        assert_eq!(table.current_page(), 4);
    }

    #[test]
    fn test_navigation_clamps_silently() {
        let mut table = controller(30, 10);
        table.previous_page();
        assert_eq!(table.current_page(), 1);

        table.select_page(99);
        assert_eq!(table.current_page(), 3);

        table.next_page();
        assert_eq!(table.current_page(), 3);
    }

    #[test]
    fn test_goto_rejects_instead_of_clamping() {
        let mut table = controller(30, 10);

        assert_eq!(table.goto(""), Err(GotoPageError::Empty));
        assert_eq!(
            table.goto("two"),
            Err(GotoPageError::NotANumber {
                input: "two".to_string()
            })
        );
        assert_eq!(
            table.goto("4"),
            Err(GotoPageError::OutOfRange {
                requested: 4,
                total_pages: 3
            })
        );
        assert_eq!(table.current_page(), 1);

        assert!(table.can_goto(3));
        assert!(!table.can_goto(0));
        assert!(!table.can_goto(4));

        assert_eq!(table.goto(" 2 "), Ok(()));
        assert_eq!(table.current_page(), 2);
    }

    #[test]
    fn test_visible_page_slices_the_result_set() {
        let mut table = controller(25, 10);
        assert_eq!(table.visible_page().len(), 10);

        table.select_page(3);
        let last = table.visible_page();
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].1, "item 020");
    }

    #[test]
    fn test_replacing_rows_resets_page() {
        let mut table = controller(100, 10);
        table.select_page(10);
        table.set_rows(vec!["only".to_string()], |_| None);
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.total_pages(), 1);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let mut table = controller(12, 50);
        table.set_search("");
        assert_eq!(table.total_items(), 12);
        table.set_search("   ");
        assert_eq!(table.total_items(), 12);
    }
}
