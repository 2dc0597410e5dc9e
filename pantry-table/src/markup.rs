//! What the sorter needs to know about a table, independent of where the
//! table lives.

use crate::column::SortOrder;

/// Marks a header cell's column name override.
pub const NAME_HINT: &str = "data-name";
/// Marks a header cell's comparison key override.
pub const KEY_HINT: &str = "data-key";
/// Marks a header cell's column type.
pub const TYPE_HINT: &str = "data-type";
/// Marks a header cell whose column sorts in reverse.
pub const REVERSE_HINT: &str = "data-reverse";
/// Marks a body cell's explicit sort key.
pub const SORT_KEY_HINT: &str = "data-sort";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMarkup {
    pub text: String,
    pub sort_key: Option<String>,
    pub row_span: u32,
    pub col_span: u32,
}

impl CellMarkup {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sort_key: None,
            row_span: 1,
            col_span: 1,
        }
    }

    pub fn with_sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    pub fn with_spans(mut self, row_span: u32, col_span: u32) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    pub fn is_spanned(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnHints {
    pub name: Option<String>,
    pub key: Option<String>,
    pub sort_type: Option<String>,
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub cell: CellMarkup,
    pub hints: ColumnHints,
}

impl HeaderCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            cell: CellMarkup::new(text),
            hints: ColumnHints::default(),
        }
    }

    pub fn with_type(mut self, sort_type: impl Into<String>) -> Self {
        self.hints.sort_type = Some(sort_type.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.hints.name = Some(name.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.hints.key = Some(key.into());
        self
    }

    pub fn reversed(mut self) -> Self {
        self.hints.reverse = true;
        self
    }
}

/// Read and reorder access to a table's structure.
///
/// Rows are read fresh on every sort, so edits made to the table between
/// clicks are picked up.
pub trait TableMarkup {
    fn tag_name(&self) -> String;
    fn header_sections(&self) -> usize;
    fn body_sections(&self) -> usize;
    /// Rows of the (single) header section.
    fn header_rows(&self) -> Vec<Vec<HeaderCell>>;
    /// Rows of the (single) body section, in current order.
    fn body_rows(&self) -> Vec<Vec<CellMarkup>>;
    /// Rearrange body rows so that new position `i` holds old row `order[i]`.
    fn reorder_rows(&mut self, order: &[usize]);
    /// Show the sort state on a header cell.
    fn set_indicator(&mut self, column: usize, order: SortOrder);
}

/// An in-memory table with one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Vec<CellMarkup>>,
    pub indicators: Vec<SortOrder>,
}

impl Table {
    pub fn new(header: Vec<HeaderCell>, rows: Vec<Vec<CellMarkup>>) -> Self {
        let indicators = vec![SortOrder::None; header.len()];
        Self {
            header,
            rows,
            indicators,
        }
    }

    /// Visible text of every cell in `column`, top to bottom.
    pub fn column_text(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(column).map(|c| c.text.clone()).unwrap_or_default())
            .collect()
    }
}

impl TableMarkup for Table {
    fn tag_name(&self) -> String {
        "table".to_string()
    }

    fn header_sections(&self) -> usize {
        1
    }

    fn body_sections(&self) -> usize {
        1
    }

    fn header_rows(&self) -> Vec<Vec<HeaderCell>> {
        vec![self.header.clone()]
    }

    fn body_rows(&self) -> Vec<Vec<CellMarkup>> {
        self.rows.clone()
    }

    fn reorder_rows(&mut self, order: &[usize]) {
        let mut old: Vec<Option<Vec<CellMarkup>>> = self.rows.drain(..).map(Some).collect();
        self.rows = order.iter().filter_map(|&i| old.get_mut(i)?.take()).collect();
        // rows missing from `order` keep their relative position at the end
        self.rows.extend(old.into_iter().flatten());
    }

    fn set_indicator(&mut self, column: usize, order: SortOrder) {
        if let Some(slot) = self.indicators.get_mut(column) {
            *slot = order;
        }
    }
}
