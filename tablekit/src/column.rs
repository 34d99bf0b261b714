//! Column descriptors and the validated column set

use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

type Accessor<R> = Arc<dyn Fn(&R) -> Option<CellValue> + Send + Sync>;

/// Configuration for one field of a row type `R`.
///
/// A column names the field (`key`), labels it (`header`, opaque to this
/// crate), and provides a total accessor from a row to an optional
/// [`CellValue`]. Search and sort participation are resolved once here, at
/// construction — never re-checked per cell downstream.
///
/// # Example
///
/// ```
/// use tablekit::Column;
///
/// struct Product { name: String, sku: String }
///
/// let name = Column::new("name", "Name", |p: &Product| Some(p.name.as_str().into()));
/// let sku = Column::new("sku", "SKU", |p: &Product| Some(p.sku.as_str().into()))
///     .sortable(false);
/// ```
pub struct Column<R> {
    key: String,
    header: String,
    accessor: Accessor<R>,
    searchable: bool,
    sortable: bool,
}

impl<R> Column<R> {
    /// Creates a new column with the given key, header, and accessor.
    ///
    /// Columns are searchable and sortable by default.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&R) -> Option<CellValue> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            accessor: Arc::new(accessor),
            searchable: true,
            sortable: true,
        }
    }

    /// Sets whether this column participates in free-text search.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Sets whether this column can be sorted on.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Returns the column key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the display header.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns `true` if this column participates in free-text search.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Returns `true` if this column can be sorted on.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Applies the accessor to a row.
    pub fn value(&self, row: &R) -> Option<CellValue> {
        (self.accessor)(row)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            searchable: self.searchable,
            sortable: self.sortable,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("searchable", &self.searchable)
            .field("sortable", &self.sortable)
            .finish()
    }
}

/// Error produced when validating a column set.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SpecError {
    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateKey { key: String },
}

/// An immutable, validated set of columns for a row type `R`.
///
/// Construction rejects duplicate keys; lookups after that are infallible
/// by key presence.
#[derive(Debug, Clone)]
pub struct TableSpec<R> {
    columns: Vec<Column<R>>,
}

impl<R> TableSpec<R> {
    /// Validates and wraps a column list.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self, SpecError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key == column.key) {
                return Err(SpecError::DuplicateKey {
                    key: column.key.clone(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Returns all columns in declaration order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Returns the column with the given key, if present.
    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(key: &str) -> Column<String> {
        Column::new(key, key.to_uppercase(), |s: &String| {
            Some(s.as_str().into())
        })
    }

    #[test]
    fn test_defaults_resolved_at_construction() {
        let column = text_column("name");
        assert!(column.is_searchable());
        assert!(column.is_sortable());

        let column = text_column("name").searchable(false).sortable(false);
        assert!(!column.is_searchable());
        assert!(!column.is_sortable());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = TableSpec::new(vec![text_column("name"), text_column("name")]);
        assert!(matches!(
            result,
            Err(SpecError::DuplicateKey { key }) if key == "name"
        ));
    }

    #[test]
    fn test_column_lookup() {
        let spec = TableSpec::new(vec![text_column("name"), text_column("sku")]).unwrap();
        assert_eq!(spec.column("sku").map(|c| c.header()), Some("SKU"));
        assert!(spec.column("missing").is_none());
    }
}
