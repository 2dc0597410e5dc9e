//! Continuous scales mapping data values to pixels.
//!
//! Tick positions come from plotters' `Ranged` coordinates; the scales here
//! only keep the domain and range and do the mapping in between.

use chrono::{DateTime, Utc};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::{Ranged, RangedDateTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    /// Map a domain value to the range. A degenerate domain maps everything
    /// to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// At most `count` round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if !lo.is_finite() || !hi.is_finite() || count == 0 {
            return Vec::new();
        }
        RangedCoordf64::from(lo..hi)
            .key_points(count)
            .into_iter()
            .filter(|v| *v >= lo && *v <= hi)
            .collect()
    }

    /// Round the upper bound up to the next tick.
    pub fn nice(&mut self, count: usize) {
        let ticks = self.ticks(count);
        let [first, second, ..] = ticks.as_slice() else {
            return;
        };
        let step = second - first;
        let (d0, d1) = self.domain;
        if step > 0.0 {
            self.domain = (d0, (d1 / step).ceil() * step);
        }
    }
}

fn to_datetime(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}

/// Label pattern for ticks `step` milliseconds apart.
fn time_pattern(step: f64) -> &'static str {
    const MINUTE: f64 = 60_000.0;
    const DAY: f64 = 86_400_000.0;
    if step < MINUTE {
        "%H:%M:%S"
    } else if step < DAY {
        "%H:%M"
    } else if step < 180.0 * DAY {
        "%b %d"
    } else {
        "%b %Y"
    }
}

/// Label every tick with the coarsest pattern that still tells them apart.
pub fn format_times(ticks: &[f64]) -> Vec<String> {
    let step = match ticks {
        [a, b, ..] => b - a,
        _ => f64::INFINITY,
    };
    let pattern = if step.is_finite() { time_pattern(step) } else { "%b %d" };
    ticks
        .iter()
        .map(|t| {
            to_datetime(*t)
                .map(|dt| dt.format(pattern).to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Linear scale over milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(domain, range),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.inner.set_domain(domain);
    }

    pub fn apply(&self, ms: f64) -> f64 {
        self.inner.apply(ms)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        self.inner.invert(pixel)
    }

    /// At most `count` UTC calendar instants inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain());
        let (Some(start), Some(end)) = (to_datetime(lo), to_datetime(hi)) else {
            return Vec::new();
        };
        if start == end {
            return vec![lo];
        }
        if count == 0 {
            return Vec::new();
        }
        let ranged: RangedDateTime<DateTime<Utc>> = (start..end).into();
        ranged
            .key_points(count)
            .into_iter()
            .map(|dt| dt.timestamp_millis() as f64)
            .filter(|t| *t >= lo && *t <= hi)
            .collect()
    }
}
