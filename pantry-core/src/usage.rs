//! Consumption rate estimates derived from an item's record history.

use crate::record::Record;
use chrono::{DateTime, Duration, Utc};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mean daily consumption over a record history.
///
/// Each pair of consecutive records contributes its decrease in quantity;
/// restocks count as zero. The total is divided by the elapsed time between
/// the first and last record. Returns `None` when nothing was consumed or no
/// time elapsed, matching an item with no known trend.
pub fn average_daily_use(records: &[Record]) -> Option<f64> {
    let mut consumed = 0.0;
    let mut elapsed = 0.0;
    for pair in records.windows(2) {
        let (q0, q1) = (pair[0].quantity, pair[1].quantity);
        if !q0.is_finite() || !q1.is_finite() {
            continue;
        }
        consumed += (q0 - q1).max(0.0);
        elapsed += (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 1000.0;
    }
    if elapsed <= 0.0 {
        return None;
    }
    let average = consumed / elapsed * SECONDS_PER_DAY;
    if average > 0.0 {
        Some(average)
    } else {
        None
    }
}

/// When the latest record runs out at the given daily rate.
///
/// `None` if there is no average, the latest quantity is zero, or the
/// result would overflow the calendar.
pub fn expected_end(latest: &Record, daily_average: Option<f64>) -> Option<DateTime<Utc>> {
    let average = daily_average.filter(|a| *a > 0.0 && a.is_finite())?;
    if latest.quantity == 0.0 || !latest.quantity.is_finite() {
        return None;
    }
    let millis = latest.quantity / average * SECONDS_PER_DAY * 1000.0;
    latest
        .timestamp
        .checked_add_signed(Duration::milliseconds(millis.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, quantity: f64) -> Record {
        Record::new(Utc.with_ymd_and_hms(2020, 4, day, hour, 0, 0).unwrap(), quantity)
    }

    #[test]
    fn test_average_ignores_restocks() {
        // 10 -> 6 over one day, restock to 12, 12 -> 10 over one day.
        let records = [at(1, 0, 10.0), at(2, 0, 6.0), at(3, 0, 12.0), at(4, 0, 10.0)];
        let average = average_daily_use(&records).unwrap();
        assert!((average - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_none_without_consumption() {
        let records = [at(1, 0, 1.0), at(2, 0, 3.0)];
        assert_eq!(average_daily_use(&records), None);
        assert_eq!(average_daily_use(&records[..1]), None);
    }

    #[test]
    fn test_expected_end() {
        let latest = at(10, 12, 3.0);
        let end = expected_end(&latest, Some(2.0)).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2020, 4, 12, 0, 0, 0).unwrap());
        assert_eq!(expected_end(&latest, None), None);
        assert_eq!(expected_end(&at(10, 12, 0.0), Some(2.0)), None);
    }
}
