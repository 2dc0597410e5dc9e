//! Wire format for the per-item history payload served by the inventory backend.
//!
//! Two spellings are accepted for every field: the descriptive one
//! (`dailyAverage`, `addedAt`, `quantity`) and the compact one the backend's
//! records endpoint emits (`avg`, `a`, `q`). Numbers may arrive as JSON numbers
//! or as decimal strings; a value that fails to parse becomes absent instead of
//! failing the whole load.
//!
//! ```text
//! {"items": [{"name": "Rice", "avg": "0.250", "records": [{"q": "2.000", "a": "2020-04-30T12:50:00Z"}]}]}
//! ```

use crate::error::{Error, Result};
use crate::record::{Record, Series};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// A number that may be encoded as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// The parsed value, or `None` when the text is not a number.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if v.is_nan() {
            None
        } else {
            Some(v)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    #[serde(alias = "a")]
    pub added_at: String,
    #[serde(alias = "q")]
    pub quantity: Numeric,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub name: String,
    #[serde(default)]
    pub ident: Option<String>,
    #[serde(default, alias = "min")]
    pub minimum: Option<Numeric>,
    #[serde(default, alias = "avg")]
    pub daily_average: Option<Numeric>,
    #[serde(default)]
    pub records: Vec<RecordPayload>,
}

impl ItemPayload {
    /// Convert into a time-ordered series.
    ///
    /// Records whose timestamp cannot be parsed are dropped since they have no
    /// position on the time axis. Records whose quantity cannot be parsed are
    /// kept with a NaN quantity and show up as a gap in the line.
    pub fn into_series(self) -> Series {
        let mut skipped = 0u32;
        let records: Vec<Record> = self
            .records
            .iter()
            .filter_map(|r| match parse_timestamp(&r.added_at) {
                Ok(timestamp) => Some(Record::new(
                    timestamp,
                    r.quantity.value().unwrap_or(f64::NAN),
                )),
                Err(e) => {
                    skipped += 1;
                    log::warn!("dataset: skipping record for {}: {}", self.name, e);
                    None
                }
            })
            .collect();
        if skipped > 0 {
            log::info!("dataset: {} kept {} records, skipped {}", self.name, records.len(), skipped);
        }

        let daily_average = self
            .daily_average
            .as_ref()
            .and_then(Numeric::value)
            .filter(|v| v.is_finite());
        let mut series = Series::new(self.name, daily_average, records);
        series.ident = self.ident;
        series.minimum = self.minimum.as_ref().and_then(Numeric::value);
        series
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetShape {
    Wrapped {
        #[serde(default)]
        items: Option<Vec<ItemPayload>>,
    },
    Bare(Vec<ItemPayload>),
}

/// The full payload for one chart: every item with its record history.
///
/// Deserializes from either `{"items": [...]}` or a bare array of items.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "DatasetShape")]
pub struct Dataset {
    pub items: Vec<ItemPayload>,
}

impl From<DatasetShape> for Dataset {
    fn from(shape: DatasetShape) -> Self {
        let items = match shape {
            DatasetShape::Wrapped { items } => items.unwrap_or_default(),
            DatasetShape::Bare(items) => items,
        };
        Self { items }
    }
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        log::info!("dataset: loaded {} items", dataset.items.len());
        Ok(dataset)
    }

    /// Convert every item into a series, keeping the supplied order.
    pub fn into_series(self) -> Vec<Series> {
        self.items.into_iter().map(ItemPayload::into_series).collect()
    }
}

/// Parse a timestamp in RFC 3339, naive ISO-8601 (taken as UTC) or plain date form.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(Error::TimestampParse(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const COMPACT: &str = r#"{"items": [
        {"name": "Rice", "ident": "rice", "min": "0.500", "avg": "0.250",
         "records": [{"q": "2.000", "a": "2020-04-30T12:50:00+01:00"},
                     {"q": "3.500", "a": "2020-04-28T09:00:00Z"}]},
        {"name": "Oats", "avg": null, "records": [{"q": 4, "a": "2020-04-29"}]}
    ]}"#;

    #[test]
    fn test_compact_payload() {
        let series = Dataset::from_json(COMPACT).unwrap().into_series();
        assert_eq!(series.len(), 2);
        let rice = &series[0];
        assert_eq!(rice.name, "Rice");
        assert_eq!(rice.ident.as_deref(), Some("rice"));
        assert_eq!(rice.minimum, Some(0.5));
        assert_eq!(rice.daily_average, Some(0.25));
        assert_eq!(rice.records[0].quantity, 3.5);
        assert_eq!(
            rice.records[1].timestamp,
            Utc.with_ymd_and_hms(2020, 4, 30, 11, 50, 0).unwrap()
        );
        assert_eq!(series[1].daily_average, None);
        assert_eq!(series[1].records[0].quantity, 4.0);
    }

    #[test]
    fn test_descriptive_payload_as_bare_array() {
        let json = r#"[{"name": "Milk", "dailyAverage": 1.5,
            "records": [{"addedAt": "2021-01-01T00:00:00Z", "quantity": "2"},
                        {"addedAt": "2021-01-02T00:00:00Z", "quantity": "n/a"}]}]"#;
        let series = Dataset::from_json(json).unwrap().into_series();
        assert_eq!(series[0].daily_average, Some(1.5));
        assert!(series[0].records[1].quantity.is_nan());
    }

    #[test]
    fn test_bad_timestamp_is_skipped() {
        let json = r#"{"items": [{"name": "Tea", "records": [
            {"q": 1, "a": "yesterday"}, {"q": 2, "a": "2021-01-02T00:00:00Z"}]}]}"#;
        let series = Dataset::from_json(json).unwrap().into_series();
        assert_eq!(series[0].records.len(), 1);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let dataset = Dataset::from_json("{}").unwrap();
        assert!(dataset.items.is_empty());
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(Numeric::Text(" 1.25 ".into()).value(), Some(1.25));
        assert_eq!(Numeric::Text("".into()).value(), None);
        assert_eq!(Numeric::Text("NaN".into()).value(), None);
    }
}
