//! Render the projection chart to a standalone SVG file.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::info;
use pantry_chart::{Chart, ChartOptions, IdContext, SvgDocument};
use pantry_core::Series;

/// Draw the chart into an in-memory document and return its markup.
pub fn render_svg(
    series: &[Series],
    now: DateTime<Utc>,
    width: f64,
    height: Option<f64>,
) -> anyhow::Result<String> {
    let document = SvgDocument::new(width, height.unwrap_or(0.0));
    let options = ChartOptions {
        width: Some(width),
        height,
    };
    let chart = Chart::new(document, series, now, options, IdContext::new("pantry-chart"))?;
    Ok(chart.target().render(chart.node()))
}

pub fn run_chart(
    series: &[Series],
    now: DateTime<Utc>,
    width: f64,
    height: Option<f64>,
    output: &Path,
) -> anyhow::Result<()> {
    let svg = render_svg(series, now, width, height)?;
    std::fs::write(output, svg)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Chart written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_series;
    use std::io::Write;

    const DATASET: &str = r#"{"items": [
        {"name": "Rice", "avg": "0.5", "records": [
            {"q": "4.000", "a": "2021-03-01T08:00:00Z"},
            {"q": "3.000", "a": "2021-03-03T08:00:00Z"}
        ]},
        {"name": "Tea", "dailyAverage": null, "records": [
            {"quantity": 20, "addedAt": "2021-03-01T08:00:00Z"},
            {"quantity": 12, "addedAt": "2021-03-02T08:00:00Z"}
        ]}
    ]}"#;

    fn now() -> DateTime<Utc> {
        "2021-03-03T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("items.json");
        std::fs::File::create(&dataset)
            .unwrap()
            .write_all(DATASET.as_bytes())
            .unwrap();
        let output = dir.path().join("chart.svg");

        let series = load_series(&dataset, false).unwrap();
        run_chart(&series, now(), 640.0, Some(300.0), &output).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("clip-path=\"url(#pantry-chart-clip-1)\""));
        assert!(svg.contains("stroke-dasharray=\"4,3\""));
    }

    #[test]
    fn test_estimate_fills_missing_average() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("items.json");
        std::fs::write(&dataset, DATASET).unwrap();

        let plain = load_series(&dataset, false).unwrap();
        assert_eq!(plain[1].daily_average, None);
        let estimated = load_series(&dataset, true).unwrap();
        assert_eq!(estimated[0].daily_average, Some(0.5));
        assert!((estimated[1].daily_average.unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_dataset_renders_empty_root() {
        let svg = render_svg(&[], now(), 640.0, None).unwrap();
        assert_eq!(svg, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
    }
}
