use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, TableError};
use crate::markup::ColumnHints;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Int,
    Float,
    /// Integer timestamps.
    Date,
}

impl FromStr for ColumnType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(ColumnType::String),
            "int" => Ok(ColumnType::Int),
            "float" => Ok(ColumnType::Float),
            "date" => Ok(ColumnType::Date),
            other => Err(TableError::UnsupportedType(other.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Order after a header click: none goes ascending, then it alternates.
    pub fn next(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::None | SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortOrder::None),
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(TableError::UnsupportedDirection(s.to_string())),
        }
    }
}

/// Validated per-column settings, read once from the header hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnConfig {
    /// Position of the header cell.
    pub index: usize,
    /// Identifies the column to scripts; the trimmed header text unless set.
    pub comparison_key: String,
    pub sort_type: ColumnType,
    /// Sort descending when ascending is shown, and vice versa.
    pub reverse: bool,
    pub display_name: String,
}

impl ColumnConfig {
    pub fn from_hints(index: usize, hints: &ColumnHints, header_text: &str) -> Result<Self> {
        let sort_type = match &hints.sort_type {
            Some(t) => t.parse()?,
            None => ColumnType::default(),
        };
        let header_text = header_text.trim();
        Ok(Self {
            index,
            comparison_key: hints
                .key
                .clone()
                .unwrap_or_else(|| header_text.to_string()),
            sort_type,
            reverse: hints.reverse,
            display_name: hints
                .name
                .clone()
                .unwrap_or_else(|| header_text.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub config: ColumnConfig,
    pub order: SortOrder,
}

impl Column {
    pub fn new(config: ColumnConfig) -> Self {
        Self {
            config,
            order: SortOrder::None,
        }
    }

    /// Whether rows end up in descending key order once the reverse flag
    /// is taken into account. `None` when the column is unsorted.
    pub fn descending(&self) -> Option<bool> {
        match self.order {
            SortOrder::None => None,
            SortOrder::Ascending => Some(self.config.reverse),
            SortOrder::Descending => Some(!self.config.reverse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_types() {
        assert_eq!("int".parse::<ColumnType>().unwrap(), ColumnType::Int);
        assert_eq!(
            "money".parse::<ColumnType>(),
            Err(TableError::UnsupportedType("money".to_string()))
        );
    }

    #[test]
    fn test_order_cycle() {
        let mut order = SortOrder::None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            order = order.next();
            seen.push(order);
        }
        assert_eq!(
            seen,
            vec![
                SortOrder::Ascending,
                SortOrder::Descending,
                SortOrder::Ascending,
                SortOrder::Descending
            ]
        );
    }

    #[test]
    fn test_config_from_hints() {
        let hints = ColumnHints {
            name: None,
            key: None,
            sort_type: Some("date".to_string()),
            reverse: true,
        };
        let config = ColumnConfig::from_hints(2, &hints, "  Last added ").unwrap();
        assert_eq!(config.index, 2);
        assert_eq!(config.display_name, "Last added");
        assert_eq!(config.comparison_key, "Last added");

        let keyed = ColumnHints {
            key: Some("added".to_string()),
            ..hints.clone()
        };
        let config = ColumnConfig::from_hints(2, &keyed, "  Last added ").unwrap();
        assert_eq!(config.comparison_key, "added");
        assert_eq!(config.sort_type, ColumnType::Date);

        let mut column = Column::new(config);
        assert_eq!(column.descending(), None);
        column.order = SortOrder::Ascending;
        assert_eq!(column.descending(), Some(true));
    }
}
