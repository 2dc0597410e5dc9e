//! Data processing for item stock histories.
//!
//! This crate turns raw per-item series into the shapes the chart draws:
//! a shared set of bounds and one forward-projected point per item.

/// Linear depletion forecast for every item with a usable history.
pub mod projection {
    use chrono::{DateTime, Utc};
    use pantry_core::Series;
    use serde::Serialize;

    pub const MS_PER_DAY: f64 = 86_400_000.0;

    /// The forecast always reaches at least this far past the latest record.
    pub const HORIZON_DAYS: f64 = 7.0;

    /// Headroom above the largest observed quantity on the value axis.
    pub const VALUE_PAD: f64 = 1.05;

    /// A (time, value) pair with time in milliseconds since the Unix epoch.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Point {
        pub time: f64,
        pub value: f64,
    }

    impl Point {
        pub fn new(time: f64, value: f64) -> Self {
            Self { time, value }
        }

        pub fn is_defined(&self) -> bool {
            self.time.is_finite() && self.value.is_finite()
        }
    }

    /// Extent shared by every chart drawn from one dataset.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Bounds {
        /// First and last historical timestamp.
        pub time: (f64, f64),
        /// Zero up to the padded maximum quantity.
        pub value: (f64, f64),
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ProjectedSeries {
        pub name: String,
        pub history: Vec<Point>,
        /// The last historical point followed by the projected point.
        pub projection: [Point; 2],
    }

    impl ProjectedSeries {
        /// The projected point at the end of the dashed segment.
        pub fn endpoint(&self) -> Point {
            self.projection[1]
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Projection {
        /// Included series in the order the caller supplied them.
        pub series: Vec<ProjectedSeries>,
        pub bounds: Bounds,
        /// Latest instant any projection may reach.
        pub horizon: f64,
    }

    impl Projection {
        pub fn names(&self) -> Vec<String> {
            self.series.iter().map(|s| s.name.clone()).collect()
        }
    }

    /// Consumption per millisecond, zero when no usable average is known.
    pub fn usage_per_ms(daily_average: Option<f64>) -> f64 {
        match daily_average {
            Some(a) if a > 0.0 && a.is_finite() => a / MS_PER_DAY,
            _ => 0.0,
        }
    }

    /// The horizon never retreats before `now`, even for stale data.
    pub fn horizon(latest: f64, now: f64) -> f64 {
        now.max(latest + HORIZON_DAYS * MS_PER_DAY)
    }

    /// Extrapolate from `last` at `per_ms` units consumed per millisecond.
    ///
    /// Stops at zero when that happens before the horizon, otherwise reports
    /// the (possibly positive) quantity left at the horizon. A zero rate gives
    /// a flat line to the horizon. An undefined `last` quantity gives an
    /// undefined point at the horizon.
    pub fn project_point(last: Point, per_ms: f64, horizon: f64) -> Point {
        if !last.value.is_finite() {
            return Point::new(horizon, f64::NAN);
        }
        if per_ms > 0.0 {
            let depletion = last.time + (last.value / per_ms).max(0.0);
            if depletion <= horizon {
                Point::new(depletion, 0.0)
            } else {
                Point::new(horizon, last.value - per_ms * (horizon - last.time))
            }
        } else {
            Point::new(horizon, last.value)
        }
    }

    /// Compute bounds and projections for every series with at least two records.
    ///
    /// Returns `None` when no series qualifies; there is nothing to draw.
    pub fn project(series: &[Series], now: DateTime<Utc>) -> Option<Projection> {
        let included: Vec<&Series> = series.iter().filter(|s| s.has_trend()).collect();
        if included.len() < series.len() {
            log::info!(
                "projection: excluded {} of {} series with fewer than 2 records",
                series.len() - included.len(),
                series.len()
            );
        }
        if included.is_empty() {
            return None;
        }

        let mut time_min = f64::INFINITY;
        let mut time_max = f64::NEG_INFINITY;
        let mut value_max: f64 = 0.0;
        for record in included.iter().flat_map(|s| s.records.iter()) {
            let t = record.time_ms();
            time_min = time_min.min(t);
            time_max = time_max.max(t);
            if record.quantity.is_finite() {
                value_max = value_max.max(record.quantity);
            }
        }

        let horizon = horizon(time_max, now.timestamp_millis() as f64);
        let projected = included
            .iter()
            .filter_map(|s| {
                let history: Vec<Point> = s
                    .records
                    .iter()
                    .map(|r| Point::new(r.time_ms(), r.quantity))
                    .collect();
                let last = *history.last()?;
                let end = project_point(last, usage_per_ms(s.daily_average), horizon);
                Some(ProjectedSeries {
                    name: s.name.clone(),
                    history,
                    projection: [last, end],
                })
            })
            .collect();

        Some(Projection {
            series: projected,
            bounds: Bounds {
                time: (time_min, time_max),
                value: (0.0, value_max * VALUE_PAD),
            },
            horizon,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;
        use pantry_core::Record;

        fn t0() -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2021, 3, 1, 8, 0, 0).unwrap()
        }

        fn two_point(average: Option<f64>) -> Series {
            let t1 = t0() + chrono::Duration::days(2);
            Series::new(
                "Flour",
                average,
                vec![Record::new(t0(), 10.0), Record::new(t1, 6.0)],
            )
        }

        fn t1_ms() -> f64 {
            (t0() + chrono::Duration::days(2)).timestamp_millis() as f64
        }

        #[test]
        fn test_projection_reaches_zero_inside_horizon() {
            let p = project(&[two_point(Some(2.0))], t0()).unwrap();
            let end = p.series[0].endpoint();
            assert_eq!(p.horizon, t1_ms() + 7.0 * MS_PER_DAY);
            assert!((end.time - (t1_ms() + 3.0 * MS_PER_DAY)).abs() < 1.0);
            assert_eq!(end.value, 0.0);
            assert_eq!(p.series[0].projection[0], Point::new(t1_ms(), 6.0));
        }

        #[test]
        fn test_projection_exceeds_horizon() {
            let p = project(&[two_point(Some(0.5))], t0()).unwrap();
            let end = p.series[0].endpoint();
            assert_eq!(end.time, p.horizon);
            assert!((end.value - 2.5).abs() < 1e-9);
        }

        #[test]
        fn test_flat_projection_without_average() {
            for average in [None, Some(0.0), Some(-1.0)] {
                let p = project(&[two_point(average)], t0()).unwrap();
                assert_eq!(p.series[0].endpoint(), Point::new(p.horizon, 6.0));
            }
        }

        #[test]
        fn test_horizon_follows_now_for_stale_data() {
            let now = t0() + chrono::Duration::days(30);
            let p = project(&[two_point(None)], now).unwrap();
            assert_eq!(p.horizon, now.timestamp_millis() as f64);
        }

        #[test]
        fn test_bounds_and_exclusion() {
            let single = Series::new("Salt", None, vec![Record::new(t0(), 50.0)]);
            let p = project(&[single, two_point(None)], t0()).unwrap();
            assert_eq!(p.names(), vec!["Flour".to_string()]);
            assert_eq!(p.bounds.time, (t0().timestamp_millis() as f64, t1_ms()));
            assert!((p.bounds.value.1 - 10.5).abs() < 1e-9);
            assert_eq!(p.bounds.value.0, 0.0);
        }

        #[test]
        fn test_undefined_last_quantity_has_no_endpoint() {
            for average in [Some(2.0), None] {
                let end = project_point(Point::new(1000.0, f64::NAN), usage_per_ms(average), 1e12);
                assert!(!end.is_defined());
                assert_eq!(end.time, 1e12);
            }

            let t1 = t0() + chrono::Duration::days(1);
            let series = Series::new(
                "Milk",
                Some(1.0),
                vec![Record::new(t0(), 4.0), Record::new(t1, f64::NAN)],
            );
            let p = project(&[series], t0()).unwrap();
            assert!(!p.series[0].endpoint().is_defined());
            assert!((p.bounds.value.1 - 4.2).abs() < 1e-9);
        }

        #[test]
        fn test_nothing_to_project() {
            let single = Series::new("Salt", None, vec![Record::new(t0(), 50.0)]);
            assert!(project(&[single], t0()).is_none());
            assert!(project(&[], t0()).is_none());
        }
    }
}
