//! Sort a CSV table with the same rules as the browser tables.

use std::io::{Read, Write};

use log::info;
use pantry_table::{CellMarkup, HeaderCell, SortOrder, Table, TableSorter};

/// Read a CSV table, sort it by `column` and write it back out.
///
/// `types` gives per-column types in order; missing entries default to
/// string. Columns listed in `reverse` sort in the opposite direction.
pub fn run_sort<R: Read, W: Write>(
    input: R,
    output: W,
    column: usize,
    direction: &str,
    types: &[String],
    reverse: &[usize],
) -> anyhow::Result<()> {
    let order: SortOrder = direction.parse()?;
    let mut reader = csv::Reader::from_reader(input);

    let header: Vec<HeaderCell> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut cell = HeaderCell::new(name);
            if let Some(t) = types.get(i).filter(|t| !t.is_empty()) {
                cell = cell.with_type(t.as_str());
            }
            if reverse.contains(&i) {
                cell = cell.reversed();
            }
            cell
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(CellMarkup::new).collect());
    }

    let sorter = TableSorter::new(Table::new(header, rows), Some((column, order)))?;
    let table = sorter.into_inner();
    info!("Sorted {} rows by column {}", table.rows.len(), column);

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(table.header.iter().map(|h| h.cell.text.as_str()))?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|c| c.text.as_str()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANTRY: &str = "item,left,added\nrice,2.5,200\nbeans,10,100\noats,,300\n";

    fn sorted(column: usize, direction: &str, types: &[&str], reverse: &[usize]) -> String {
        let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        let mut out = Vec::new();
        run_sort(PANTRY.as_bytes(), &mut out, column, direction, &types, reverse).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sort_float_column_nulls_last() {
        assert_eq!(
            sorted(1, "asc", &["string", "float"], &[]),
            "item,left,added\nrice,2.5,200\nbeans,10,100\noats,,300\n"
        );
        assert_eq!(
            sorted(1, "desc", &["string", "float"], &[]),
            "item,left,added\nbeans,10,100\nrice,2.5,200\noats,,300\n"
        );
    }

    #[test]
    fn test_reverse_column() {
        assert_eq!(
            sorted(2, "asc", &["", "", "date"], &[2]),
            "item,left,added\noats,,300\nrice,2.5,200\nbeans,10,100\n"
        );
    }

    #[test]
    fn test_rejects_unknown_type() {
        let mut out = Vec::new();
        let types = vec!["money".to_string()];
        assert!(run_sort(PANTRY.as_bytes(), &mut out, 0, "asc", &types, &[]).is_err());
    }
}
