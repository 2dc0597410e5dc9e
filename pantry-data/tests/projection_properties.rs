use chrono::{Duration, TimeZone, Utc};
use pantry_core::{Record, Series};
use pantry_data::projection::{project, usage_per_ms};
use proptest::prelude::*;

fn arb_series() -> impl Strategy<Value = (Vec<(i64, f64)>, Option<f64>)> {
    (
        prop::collection::vec((0i64..10_000_000, 0.0f64..500.0), 2..12),
        prop::option::of(-2.0f64..20.0),
    )
}

fn build(points: &[(i64, f64)], average: Option<f64>) -> Series {
    let base = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    let records = points
        .iter()
        .map(|(secs, q)| Record::new(base + Duration::seconds(*secs), *q))
        .collect();
    Series::new("item", average, records)
}

proptest! {
    /// The projected point never precedes the last record and never passes the horizon.
    #[test]
    fn projected_time_within_bounds((points, average) in arb_series(), now_offset in 0i64..20_000_000) {
        let series = build(&points, average);
        let now = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(now_offset);
        let p = project(&[series], now).unwrap();
        let s = &p.series[0];
        prop_assert!(s.endpoint().time >= s.projection[0].time);
        prop_assert!(s.endpoint().time <= p.horizon);
    }

    /// A positive average that runs out before the horizon lands exactly on the depletion instant.
    #[test]
    fn depletion_time_matches_formula((points, _) in arb_series(), average in 0.01f64..50.0) {
        let series = build(&points, Some(average));
        let now = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let p = project(&[series], now).unwrap();
        let s = &p.series[0];
        let last = s.projection[0];
        let depletion = last.time + last.value / usage_per_ms(Some(average));
        if depletion <= p.horizon {
            prop_assert_eq!(s.endpoint().time, depletion);
            prop_assert_eq!(s.endpoint().value, 0.0);
        } else {
            prop_assert_eq!(s.endpoint().time, p.horizon);
        }
    }

    /// Without a positive average the projection is flat.
    #[test]
    fn flat_without_positive_average((points, _) in arb_series(), average in prop::option::of(-5.0f64..=0.0)) {
        let series = build(&points, average);
        let now = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let p = project(&[series], now).unwrap();
        let s = &p.series[0];
        prop_assert_eq!(s.endpoint().value, s.projection[0].value);
    }
}
