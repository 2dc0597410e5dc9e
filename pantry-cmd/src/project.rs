//! Text and JSON reports of each item's projected stock level.

use std::io::Write;

use chrono::{DateTime, Utc};
use log::info;
use pantry_core::quantity::format_quantity;
use pantry_core::since::{natural, since};
use pantry_core::{usage, Series};
use pantry_data::projection::project;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn quantity(value: f64) -> String {
    format_quantity(value, false).unwrap_or_else(|_| "?".to_string())
}

fn instant(ms: f64) -> String {
    DateTime::from_timestamp_millis(ms as i64)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "?".to_string())
}

pub fn run_project<W: Write>(
    series: &[Series],
    now: DateTime<Utc>,
    json: bool,
    mut out: W,
) -> anyhow::Result<()> {
    let Some(projection) = project(series, now) else {
        info!("No item has enough records to project");
        if json {
            writeln!(out, "null")?;
        }
        return Ok(());
    };

    if json {
        serde_json::to_writer_pretty(&mut out, &projection)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Horizon: {}", instant(projection.horizon))?;
    for s in series {
        writeln!(out, "{}", s.name)?;
        let Some(latest) = s.latest() else {
            writeln!(out, "  no records")?;
            continue;
        };
        writeln!(
            out,
            "  latest:    {} ({})",
            quantity(latest.quantity),
            since(latest.timestamp.naive_utc(), now.naive_utc())
        )?;
        writeln!(
            out,
            "  recorded:  {}",
            natural(latest.timestamp.naive_utc(), now.naive_utc())
        )?;
        if let Some(delta) = s.latest_delta() {
            let change = format_quantity(delta, true).unwrap_or_else(|_| "?".to_string());
            writeln!(out, "  change:    {}", change)?;
        }
        match s.daily_average {
            Some(average) => writeln!(out, "  average:   {}/day", quantity(average))?,
            None => writeln!(out, "  average:   unknown")?,
        }
        if let Some(end) = usage::expected_end(latest, s.daily_average) {
            writeln!(out, "  runs out:  {}", end.format(TIME_FORMAT))?;
        }
        match projection.series.iter().find(|p| p.name == s.name) {
            Some(p) => {
                let end = p.endpoint();
                writeln!(
                    out,
                    "  projected: {} at {}",
                    quantity(end.value),
                    instant(end.time)
                )?;
            }
            None => writeln!(out, "  projected: not enough records")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pantry_core::Record;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 8, 0, 0).unwrap()
    }

    fn items() -> Vec<Series> {
        vec![
            Series::new(
                "Flour",
                Some(2.0),
                vec![
                    Record::new(t0(), 10.0),
                    Record::new(t0() + Duration::days(2), 6.0),
                ],
            ),
            Series::new("Salt", None, vec![Record::new(t0(), 1.0)]),
        ]
    }

    #[test]
    fn test_text_report() {
        let mut out = Vec::new();
        run_project(&items(), t0() + Duration::days(2) + Duration::minutes(5), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Horizon: 2021-03-10 08:00 UTC"));
        assert!(text.contains("  latest:    6 (5 minutes ago)"));
        assert!(text.contains("  recorded:  08:00"));
        assert!(text.contains("  change:    \u{2212}4"));
        assert!(text.contains("  recorded:  Monday 08:00"));
        assert!(text.contains("  change:    +1"));
        assert!(text.contains("  runs out:  2021-03-06 08:00 UTC"));
        assert!(text.contains("  projected: 0 at 2021-03-06 08:00 UTC"));
        assert!(text.contains("  projected: not enough records"));
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        run_project(&items(), t0(), true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["series"][0]["name"], "Flour");
        assert_eq!(value["series"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_nothing_to_project() {
        let mut out = Vec::new();
        run_project(&items()[1..], t0(), false, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
