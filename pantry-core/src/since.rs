//! Human readable relative times: "3 days ago" from `since`, "last Monday
//! 12:50" from `natural`.
//!
//! Calendar arithmetic works on wall-clock values: stepping back a month from
//! 31 March lands on the last day of February.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, Default)]
struct Step {
    months: i32,
    days: i64,
}

impl Step {
    fn days(days: i64) -> Self {
        Self { days, ..Self::default() }
    }

    fn months(months: i32) -> Self {
        Self { months, ..Self::default() }
    }

    fn years(years: i32) -> Self {
        Self::months(years * 12)
    }

    fn negate(self) -> Self {
        Self {
            months: -self.months,
            days: -self.days,
        }
    }
}

/// Shift a date-time by whole calendar units, clamping the day of month.
/// `None` past the representable range.
fn calendar_delta(dt: NaiveDateTime, step: Step) -> Option<NaiveDateTime> {
    let months = Months::new(step.months.unsigned_abs());
    let shifted = if step.months >= 0 {
        dt.checked_add_months(months)?
    } else {
        dt.checked_sub_months(months)?
    };
    shifted.checked_add_signed(Duration::days(step.days))
}

/// Whether `first` lies after `second` shifted by `step`.
fn after(first: NaiveDateTime, second: NaiveDateTime, step: Step) -> bool {
    calendar_delta(second, step).map_or(true, |bound| first > bound)
}

/// Number of whole steps between `first` and `second`, rounding the remainder.
fn calendar_count(first: NaiveDateTime, second: NaiveDateTime, step: Step) -> i64 {
    let Some(after_first) = calendar_delta(first, step) else {
        return 0;
    };
    let mut count = 0;
    let mut previous = second;
    while previous > after_first {
        let Some(earlier) = calendar_delta(previous, step.negate()) else {
            break;
        };
        previous = earlier;
        count += 1;
    }
    let diff = (previous - first).num_milliseconds() as f64;
    let unit = (after_first - first).num_milliseconds() as f64;
    count + (diff / unit).round_ties_even() as i64
}

fn plural(count: i64, one: &str, unit: &str, ago: &str) -> String {
    if count == 1 {
        format!("{}{}", one, ago)
    } else {
        format!("{} {}{}", count, unit, ago)
    }
}

fn describe(then: NaiveDateTime, now: NaiveDateTime, has_time: bool) -> String {
    let (past, first, second) = if then >= now {
        (false, now, then)
    } else {
        (true, then, now)
    };
    let diff = second - first;

    if !has_time && diff.is_zero() {
        return "today".to_string();
    }
    if has_time && diff < Duration::minutes(1) {
        return if past { "just now" } else { "now" }.to_string();
    }

    let ago = if past { " ago" } else { "" };

    if has_time && diff < Duration::hours(1) {
        let minutes = (diff.num_milliseconds() as f64 / 60_000.0).round_ties_even() as i64;
        return plural(minutes, "a minute", "minutes", ago);
    }
    if has_time && after(first, second, Step::days(-1)) {
        let hours = (diff.num_milliseconds() as f64 / 3_600_000.0).round_ties_even() as i64;
        return plural(hours, "an hour", "hours", ago);
    }
    if !has_time && diff == Duration::days(1) {
        return if past { "yesterday" } else { "tomorrow" }.to_string();
    }
    if after(first, second, Step::days(-7)) {
        let days = calendar_count(first, second, Step::days(1));
        return plural(days, "a day", "days", ago);
    }
    if after(first, second, Step::months(-1)) {
        let weeks = calendar_count(first, second, Step::days(7));
        return plural(weeks, "a week", "weeks", ago);
    }
    if after(first, second, Step::years(-1)) {
        let months = calendar_count(first, second, Step::months(1));
        return plural(months, "a month", "months", ago);
    }
    let years = calendar_count(first, second, Step::years(1));
    plural(years, "a year", "years", ago)
}

/// Time between two date-times, e.g. "5 minutes ago" or "an hour".
pub fn since(then: NaiveDateTime, now: NaiveDateTime) -> String {
    describe(then, now, true)
}

/// Time between two dates, e.g. "yesterday" or "2 weeks ago".
pub fn since_date(then: NaiveDate, now: NaiveDate) -> String {
    describe(then.and_time(NaiveTime::MIN), now.and_time(NaiveTime::MIN), false)
}

/// Where a date sits relative to today, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nearby {
    YearBefore,
    LastYear,
    ThisYear,
    LastWeek,
    ThisWeek,
    Yesterday,
    Today,
    Tomorrow,
    NextWeek,
    NextYear,
    YearAfter,
}

impl Nearby {
    fn classify(then: NaiveDate, today: NaiveDate) -> Self {
        match (then - today).num_days() {
            0 => return Nearby::Today,
            -1 => return Nearby::Yesterday,
            1 => return Nearby::Tomorrow,
            _ => {}
        }
        let monday = Duration::days(today.weekday().num_days_from_monday() as i64);
        if let Some(this_week) = today.checked_sub_signed(monday) {
            match (then - this_week).num_days().div_euclid(7) {
                -1 => return Nearby::LastWeek,
                0 => return Nearby::ThisWeek,
                1 => return Nearby::NextWeek,
                _ => {}
            }
        }
        match then.year() - today.year() {
            ..=-2 => Nearby::YearBefore,
            -1 => Nearby::LastYear,
            0 => Nearby::ThisYear,
            1 => Nearby::NextYear,
            _ => Nearby::YearAfter,
        }
    }

    /// Format patterns without and with a time of day.
    fn patterns(self) -> (&'static str, &'static str) {
        match self {
            Nearby::YearBefore | Nearby::YearAfter => ("%B %Y", "%B %Y"),
            Nearby::LastYear => ("last %B", "last %B"),
            Nearby::ThisYear => ("%-d %B", "%-d %B %H:%M"),
            Nearby::LastWeek => ("last %A", "last %A %H:%M"),
            Nearby::ThisWeek => ("%A", "%A %H:%M"),
            Nearby::Yesterday => ("yesterday", "yesterday %H:%M"),
            Nearby::Today => ("today", "%H:%M"),
            Nearby::Tomorrow => ("tomorrow", "tomorrow %H:%M"),
            Nearby::NextWeek => ("next %A", "next %A %H:%M"),
            Nearby::NextYear => ("next %B", "next %B"),
        }
    }
}

/// Calendar-relative description, e.g. "yesterday 12:50" or "last Monday 09:00".
pub fn natural(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let (_, pattern) = Nearby::classify(then.date(), now.date()).patterns();
    then.format(pattern).to_string()
}

/// Calendar-relative description of a date, e.g. "tomorrow" or "next March".
pub fn natural_date(then: NaiveDate, today: NaiveDate) -> String {
    let (pattern, _) = Nearby::classify(then, today).patterns();
    then.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, 30).unwrap()
    }

    fn datetime() -> NaiveDateTime {
        date().and_hms_opt(12, 50, 0).unwrap()
    }

    #[test]
    fn test_since_date_only() {
        let cases = [
            (-700, "2 years ago"),
            (-371, "a year ago"),
            (-354, "12 months ago"),
            (-55, "2 months ago"),
            (-31, "a month ago"),
            (-30, "4 weeks ago"),
            (-7, "a week ago"),
            (-6, "6 days ago"),
            (-1, "yesterday"),
            (0, "today"),
            (1, "tomorrow"),
            (6, "6 days"),
            (7, "a week"),
            (29, "4 weeks"),
            (30, "a month"),
            (55, "2 months"),
            (354, "12 months"),
            (371, "a year"),
            (700, "2 years"),
        ];
        for (days, expected) in cases {
            let then = date() + Duration::days(days);
            assert_eq!(since_date(then, date()), expected, "offset {} days", days);
        }
    }

    #[test]
    fn test_since_with_time() {
        let cases = [
            (-Duration::days(700), "2 years ago"),
            (-Duration::days(31), "a month ago"),
            (-(Duration::days(30) + Duration::hours(22)), "4 weeks ago"),
            (-(Duration::days(7) + Duration::hours(1)), "a week ago"),
            (-(Duration::days(6) + Duration::hours(22)), "7 days ago"),
            (-Duration::hours(24), "a day ago"),
            (-(Duration::hours(23) + Duration::minutes(45)), "24 hours ago"),
            (-Duration::hours(1), "an hour ago"),
            (-(Duration::minutes(59) + Duration::seconds(45)), "60 minutes ago"),
            (-Duration::seconds(105), "2 minutes ago"),
            (-Duration::seconds(75), "a minute ago"),
            (-Duration::seconds(30), "just now"),
            (Duration::zero(), "now"),
            (Duration::seconds(30), "now"),
            (Duration::seconds(75), "a minute"),
            (Duration::hours(1), "an hour"),
            (Duration::hours(24), "a day"),
            (Duration::days(7) + Duration::hours(1), "a week"),
            (Duration::days(29) + Duration::hours(22), "4 weeks"),
            (Duration::days(30), "a month"),
            (Duration::days(371), "a year"),
        ];
        for (offset, expected) in cases {
            assert_eq!(since(datetime() + offset, datetime()), expected, "offset {:?}", offset);
        }
    }

    #[test]
    fn test_month_end_clamps() {
        let march_31 = NaiveDate::from_ymd_opt(2021, 3, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let back = calendar_delta(march_31, Step::months(-1)).unwrap();
        assert_eq!(back.date(), NaiveDate::from_ymd_opt(2021, 2, 28).unwrap());
        let leap = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let next = calendar_delta(leap, Step::years(1)).unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2021, 2, 28).unwrap());
    }

    #[test]
    fn test_out_of_range_shift_is_none() {
        assert_eq!(calendar_delta(NaiveDateTime::MAX, Step::years(1)), None);
        assert_eq!(calendar_delta(NaiveDateTime::MIN, Step::days(-1)), None);
        assert_eq!(since(NaiveDateTime::MIN, NaiveDateTime::MIN + Duration::days(800)), "2 years ago");
    }

    #[test]
    fn test_natural_date_only() {
        let cases = [
            (-(121 + 365), "December 2018"),
            (-(121 + 364), "last January"),
            (-121, "last December"),
            (-120, "1 January"),
            (-11, "19 April"),
            (-10, "last Monday"),
            (-4, "last Sunday"),
            (-2, "Tuesday"),
            (-1, "yesterday"),
            (0, "today"),
            (1, "tomorrow"),
            (2, "Saturday"),
            (4, "next Monday"),
            (10, "next Sunday"),
            (11, "11 May"),
            (245, "31 December"),
            (246, "next January"),
            (246 + 364, "next December"),
            (246 + 365, "January 2022"),
        ];
        for (days, expected) in cases {
            let then = date() + Duration::days(days);
            assert_eq!(natural_date(then, date()), expected, "offset {} days", days);
        }
    }

    #[test]
    fn test_natural_with_time() {
        let cases = [
            (-Duration::days(121 + 365), "December 2018"),
            (-Duration::days(121 + 364), "last January"),
            (-Duration::days(121), "last December"),
            (-Duration::days(120), "1 January 12:50"),
            (-Duration::days(11), "19 April 12:50"),
            (-Duration::days(10), "last Monday 12:50"),
            (-Duration::days(4), "last Sunday 12:50"),
            (-Duration::days(2), "Tuesday 12:50"),
            (-Duration::days(1), "yesterday 12:50"),
            (-Duration::minutes(90), "11:20"),
            (Duration::zero(), "12:50"),
            (Duration::minutes(90), "14:20"),
            (Duration::days(1), "tomorrow 12:50"),
            (Duration::days(2), "Saturday 12:50"),
            (Duration::days(4), "next Monday 12:50"),
            (Duration::days(10), "next Sunday 12:50"),
            (Duration::days(11), "11 May 12:50"),
            (Duration::days(245), "31 December 12:50"),
            (Duration::days(246), "next January"),
            (Duration::days(246 + 364), "next December"),
            (Duration::days(246 + 365), "January 2022"),
        ];
        for (offset, expected) in cases {
            assert_eq!(natural(datetime() + offset, datetime()), expected, "offset {:?}", offset);
        }
    }
}
