use crate::column::{Column, ColumnConfig, SortOrder};
use crate::compare::{compare, Keyed};
use crate::error::{Result, TableError};
use crate::markup::TableMarkup;
use crate::value::extract;

/// Sorts a table's body rows by whichever header was clicked last.
#[derive(Debug)]
pub struct TableSorter<M: TableMarkup> {
    table: M,
    columns: Vec<Column>,
}

fn validate<M: TableMarkup>(table: &M) -> Result<Vec<Column>> {
    let tag = table.tag_name();
    if !tag.eq_ignore_ascii_case("table") {
        return Err(TableError::NotATable(tag));
    }
    match table.header_sections() {
        1 => {}
        n => return Err(TableError::HeaderSections(n)),
    }
    match table.body_sections() {
        1 => {}
        n => return Err(TableError::BodySections(n)),
    }
    let mut header_rows = table.header_rows();
    if header_rows.len() != 1 {
        return Err(TableError::HeaderRows(header_rows.len()));
    }
    let header = header_rows.remove(0);

    for (column, cell) in header.iter().enumerate() {
        if cell.cell.is_spanned() {
            return Err(TableError::SpannedCell { row: 0, column });
        }
    }
    for (row, cells) in table.body_rows().iter().enumerate() {
        if let Some(column) = cells.iter().position(|c| c.is_spanned()) {
            return Err(TableError::SpannedCell {
                row: row + 1,
                column,
            });
        }
    }

    header
        .iter()
        .enumerate()
        .map(|(i, h)| ColumnConfig::from_hints(i, &h.hints, &h.cell.text).map(Column::new))
        .collect()
}

/// Initial sort from optional constructor arguments. A column without a
/// direction sorts ascending.
pub fn initial_order(column: Option<usize>, direction: Option<&str>) -> Result<Option<(usize, SortOrder)>> {
    let order = direction.map(str::parse::<SortOrder>).transpose()?;
    match (column, order) {
        (Some(index), order) => Ok(Some((index, order.unwrap_or(SortOrder::Ascending)))),
        (None, None | Some(SortOrder::None)) => Ok(None),
        (None, Some(_)) => Err(TableError::DirectionWithoutColumn(
            direction.unwrap_or_default().to_string(),
        )),
    }
}

impl<M: TableMarkup> TableSorter<M> {
    /// Check the table's structure and column hints, then apply the initial
    /// sort if one is given.
    pub fn new(table: M, initial: Option<(usize, SortOrder)>) -> Result<Self> {
        let columns = validate(&table)?;
        log::debug!("table: {} sortable columns", columns.len());
        let mut sorter = Self { table, columns };
        if let Some((column, order)) = initial {
            sorter.sort_by(column, order)?;
        }
        Ok(sorter)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn table(&self) -> &M {
        &self.table
    }

    pub fn into_inner(self) -> M {
        self.table
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.columns.len() {
            return Err(TableError::ColumnOutOfRange {
                index,
                count: self.columns.len(),
            });
        }
        Ok(())
    }

    /// Advance the clicked column's order and sort by it.
    pub fn click(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        let next = self.columns[index].order.next();
        self.sort_by(index, next)
    }

    /// Sort by `index` in `order`, resetting every other column.
    pub fn sort_by(&mut self, index: usize, order: SortOrder) -> Result<()> {
        self.check(index)?;
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.order = if i == index { order } else { SortOrder::None };
        }
        for (i, column) in self.columns.iter().enumerate() {
            self.table.set_indicator(i, column.order);
        }

        let column = &self.columns[index];
        let Some(descending) = column.descending() else {
            return Ok(());
        };
        let sort_type = column.config.sort_type;
        let mut keyed: Vec<Keyed> = self
            .table
            .body_rows()
            .iter()
            .enumerate()
            .map(|(i, row)| (extract(row.get(index), sort_type), i))
            .collect();
        keyed.sort_by(|a, b| compare(a, b, descending));
        let order: Vec<usize> = keyed.into_iter().map(|(_, i)| i).collect();
        self.table.reorder_rows(&order);
        log::debug!(
            "table: sorted {} rows by {:?} {:?}",
            order.len(),
            column.config.display_name,
            column.order
        );
        Ok(())
    }
}
