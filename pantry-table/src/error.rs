use thiserror::Error;

/// Structural problems found while setting up a sortable table.
///
/// All of these are raised at construction; a table that builds never
/// fails to sort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Expected a <table> element, got <{0}>")]
    NotATable(String),

    #[error("Expected exactly one header section, found {0}")]
    HeaderSections(usize),

    #[error("Expected exactly one body section, found {0}")]
    BodySections(usize),

    #[error("Expected exactly one header row, found {0}")]
    HeaderRows(usize),

    /// Cells spanning several rows or columns cannot be reordered
    #[error("Cell at row {row}, column {column} spans multiple rows or columns")]
    SpannedCell { row: usize, column: usize },

    #[error("Unsupported column type {0:?}")]
    UnsupportedType(String),

    #[error("Unsupported sort direction {0:?}")]
    UnsupportedDirection(String),

    #[error("Sort direction {0:?} given without a column")]
    DirectionWithoutColumn(String),

    #[error("Column {index} out of range for a table with {count} columns")]
    ColumnOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, TableError>;
