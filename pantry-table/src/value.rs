use std::cmp::Ordering;

use crate::column::ColumnType;
use crate::markup::CellMarkup;

/// A cell's value as the sorter sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SortKey {
    /// Natural order. Keys from one column always share a variant.
    pub fn cmp_natural(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Sort key of `cell` for a column of `sort_type`. An explicit sort key wins
/// over the visible text; missing cells and unparseable values are `None`.
pub fn extract(cell: Option<&CellMarkup>, sort_type: ColumnType) -> Option<SortKey> {
    let cell = cell?;
    let raw = cell.sort_key.as_deref().unwrap_or(&cell.text);
    match sort_type {
        ColumnType::String => Some(SortKey::Text(raw.to_uppercase())),
        ColumnType::Int | ColumnType::Date => raw.trim().parse().ok().map(SortKey::Int),
        ColumnType::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(SortKey::Float),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_wins_over_text() {
        let cell = CellMarkup::new("3 days ago").with_sort_key("1614585600");
        assert_eq!(
            extract(Some(&cell), ColumnType::Date),
            Some(SortKey::Int(1614585600))
        );
    }

    #[test]
    fn test_parse_failures_are_null() {
        assert_eq!(extract(Some(&CellMarkup::new("")), ColumnType::Int), None);
        assert_eq!(extract(Some(&CellMarkup::new("n/a")), ColumnType::Float), None);
        assert_eq!(extract(Some(&CellMarkup::new("NaN")), ColumnType::Float), None);
        assert_eq!(extract(None, ColumnType::String), None);
    }

    #[test]
    fn test_values() {
        assert_eq!(
            extract(Some(&CellMarkup::new(" 42 ")), ColumnType::Int),
            Some(SortKey::Int(42))
        );
        assert_eq!(
            extract(Some(&CellMarkup::new("2.5")), ColumnType::Float),
            Some(SortKey::Float(2.5))
        );
        assert_eq!(
            extract(Some(&CellMarkup::new("Rice")), ColumnType::String),
            Some(SortKey::Text("RICE".to_string()))
        );
    }
}
