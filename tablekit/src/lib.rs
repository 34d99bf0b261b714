//! Headless table presentation core
//!
//! Filtering, sorting, free-text search, and pagination state for tabular
//! data, with no rendering and no I/O. A frontend supplies rows and column
//! descriptors; this crate derives the visible slice and the pager layout.

pub mod column;
pub mod controller;
pub mod pager;
pub mod rows;
pub mod sort;
pub mod value;
pub mod view;

pub use column::Column;
pub use column::SpecError;
pub use column::TableSpec;
pub use controller::GotoPageError;
pub use controller::TableController;
pub use controller::parse_goto;
pub use pager::PageToken;
pub use pager::page_range;
pub use rows::RowKey;
pub use rows::RowSet;
pub use sort::Direction;
pub use sort::SortState;
pub use value::CellValue;
pub use view::visible_indices;
