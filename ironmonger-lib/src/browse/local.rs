//! Client-side browsing over a fully fetched collection

use tablekit::TableController;
use tablekit::TableSpec;

use crate::api::query::ListPages;
use crate::error::Error;
use crate::model::Record;

/// A table over a collection fetched once and browsed locally.
///
/// Right for result sets small enough to hold in memory (a user's own
/// orders, a wishlist): search keystrokes and sort clicks never touch the
/// network. Rows are keyed by their record id, so reordering the view
/// never confuses row identity.
///
/// # Example
///
/// ```ignore
/// let spec = TableSpec::new(vec![
///     Record::column("reference", "Reference"),
///     Record::column("total", "Total"),
/// ])?;
///
/// let mut browser = LocalBrowser::fetch(
///     client.order_pages(&ListQuery::new().limit(100)),
///     spec,
///     20,
/// ).await?;
///
/// browser.table_mut().set_search("pending");
/// for (key, record) in browser.table_mut().visible_page() {
///     println!("{} {:?}", key, record.get_string("reference"));
/// }
/// ```
#[derive(Debug)]
pub struct LocalBrowser {
    table: TableController<Record>,
}

impl LocalBrowser {
    /// Builds a browser over an already-fetched collection.
    pub fn new(spec: TableSpec<Record>, rows: Vec<Record>, page_size: u32) -> Self {
        let mut table = TableController::new(spec, page_size);
        table.set_rows(rows, |record| record.id());
        Self { table }
    }

    /// Drains a paginated listing and builds a browser over the result.
    pub async fn fetch(
        pages: ListPages<'_, Record>,
        spec: TableSpec<Record>,
        page_size: u32,
    ) -> Result<Self, Error> {
        let rows = pages.collect_all().await?;
        Ok(Self::new(spec, rows, page_size))
    }

    /// Replaces the backing collection (cursor resets to page 1).
    pub fn replace_rows(&mut self, rows: Vec<Record>) {
        self.table.set_rows(rows, |record| record.id());
    }

    /// Returns the table state.
    pub fn table(&self) -> &TableController<Record> {
        &self.table
    }

    /// Returns the table state mutably — search, sort, and navigation all
    /// live there.
    pub fn table_mut(&mut self) -> &mut TableController<Record> {
        &mut self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn product(id: Uuid, name: &str) -> Record {
        let mut record = Record::with_id(id).set("name", name);
        record.insert("id", id);
        record
    }

    #[test]
    fn test_rows_keyed_by_record_id() {
        let id = Uuid::new_v4();
        let spec = TableSpec::new(vec![Record::column("name", "Name")]).unwrap();
        let mut browser = LocalBrowser::new(spec, vec![product(id, "Anvil")], 10);

        let page = browser.table_mut().visible_page();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].0.as_uuid(), id);
    }

    #[test]
    fn test_search_and_page_locally() {
        let spec = TableSpec::new(vec![Record::column("name", "Name")]).unwrap();
        let rows = vec![
            product(Uuid::new_v4(), "Claw hammer"),
            product(Uuid::new_v4(), "Socket set"),
            product(Uuid::new_v4(), "Sledge hammer"),
        ];
        let mut browser = LocalBrowser::new(spec, rows, 2);

        browser.table_mut().set_search("hammer");
        assert_eq!(browser.table_mut().total_items(), 2);
        assert_eq!(browser.table_mut().total_pages(), 1);
    }
}
