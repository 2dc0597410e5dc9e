use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum number of records a series needs before it can show a trend.
pub const MIN_RECORDS: usize = 2;

/// One observation of an item's stock level at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    /// May be NaN when the source value could not be parsed.
    pub quantity: f64,
}

impl Record {
    pub fn new(timestamp: DateTime<Utc>, quantity: f64) -> Self {
        Self {
            timestamp,
            quantity,
        }
    }

    /// Milliseconds since the Unix epoch, the unit used by chart scales.
    pub fn time_ms(&self) -> f64 {
        self.timestamp.timestamp_millis() as f64
    }
}

/// One item's history of records, ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    /// URL-safe identifier assigned by the backend, if any.
    pub ident: Option<String>,
    /// Restock threshold set on the item.
    pub minimum: Option<f64>,
    /// Average consumption per day. Absent means no trend is known.
    pub daily_average: Option<f64>,
    pub records: Vec<Record>,
}

impl Series {
    /// Create a series, sorting the records by timestamp.
    ///
    /// The sort is stable so records sharing a timestamp keep the order the
    /// backend sent them in.
    pub fn new(name: impl Into<String>, daily_average: Option<f64>, mut records: Vec<Record>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self {
            name: name.into(),
            ident: None,
            minimum: None,
            daily_average,
            records,
        }
    }

    /// True when the series has enough records to draw a line.
    pub fn has_trend(&self) -> bool {
        self.records.len() >= MIN_RECORDS
    }

    pub fn latest(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Change in quantity from each record's predecessor, in record order.
    ///
    /// The first record counts from zero. Unparsed quantities give NaN for
    /// both their own change and the one after.
    pub fn deltas(&self) -> Vec<f64> {
        let mut previous = 0.0;
        self.records
            .iter()
            .map(|r| {
                let delta = r.quantity - previous;
                previous = r.quantity;
                delta
            })
            .collect()
    }

    /// Change recorded by the latest record.
    pub fn latest_delta(&self) -> Option<f64> {
        self.deltas().last().copied()
    }
}
