//! Click-to-sort tables.
//!
//! A [`TableSorter`] validates a table's structure and column hints once, then
//! reorders body rows whenever a header is clicked. Column types decide how
//! cell text becomes a sort key; empty or unparseable cells always sort last.

pub mod column;
pub mod compare;
pub mod error;
pub mod markup;
pub mod sorter;
pub mod value;

pub use column::{Column, ColumnConfig, ColumnType, SortOrder};
pub use error::{Result, TableError};
pub use markup::{CellMarkup, ColumnHints, HeaderCell, Table, TableMarkup};
pub use sorter::{initial_order, TableSorter};
