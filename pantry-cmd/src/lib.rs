//! Command implementations for the pantry CLI.
//!
//! Provides subcommands for projecting stock levels from a dataset file,
//! rendering the projection chart to SVG and sorting CSV tables.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use pantry_core::dataset::parse_timestamp;
use pantry_core::{usage, Dataset, Series};

pub mod chart;
pub mod project;
pub mod sort;

#[derive(Subcommand)]
pub enum Command {
    /// Print each item's stock projection
    Project {
        /// Dataset JSON file
        dataset: PathBuf,

        /// Project as of this instant instead of the current time
        #[arg(long)]
        now: Option<String>,

        /// Estimate a daily average from the history for items without one
        #[arg(long)]
        estimate: bool,

        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the projection chart to an SVG file
    Chart {
        /// Dataset JSON file
        dataset: PathBuf,

        /// Output path for the SVG
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = 800.0)]
        width: f64,

        #[arg(long)]
        height: Option<f64>,

        #[arg(long)]
        now: Option<String>,

        #[arg(long)]
        estimate: bool,
    },

    /// Sort a CSV table by one column
    Sort {
        /// Input CSV with a header row
        input: PathBuf,

        /// Zero-based column to sort by
        #[arg(short, long, default_value_t = 0)]
        column: usize,

        /// asc or desc
        #[arg(short, long, default_value = "asc")]
        direction: String,

        /// Column types in order (string, int, float, date), comma separated
        #[arg(short, long, value_delimiter = ',')]
        types: Vec<String>,

        /// Columns whose sort direction is inverted
        #[arg(short, long, value_delimiter = ',')]
        reverse: Vec<usize>,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Load a dataset file into series, optionally filling in missing averages.
pub fn load_series(path: &Path, estimate: bool) -> anyhow::Result<Vec<Series>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let mut series = Dataset::from_json(&json)?.into_series();
    if estimate {
        for s in series.iter_mut().filter(|s| s.daily_average.is_none()) {
            s.daily_average = usage::average_daily_use(&s.records);
            if let Some(average) = s.daily_average {
                log::info!("Estimated {:.3}/day for {}", average, s.name);
            }
        }
    }
    Ok(series)
}

pub fn resolve_now(now: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(parse_timestamp(s)?),
        None => Ok(Utc::now()),
    }
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Project {
            dataset,
            now,
            estimate,
            json,
        } => {
            let series = load_series(&dataset, estimate)?;
            let now = resolve_now(now.as_deref())?;
            project::run_project(&series, now, json, io::stdout().lock())
        }
        Command::Chart {
            dataset,
            output,
            width,
            height,
            now,
            estimate,
        } => {
            let series = load_series(&dataset, estimate)?;
            let now = resolve_now(now.as_deref())?;
            chart::run_chart(&series, now, width, height, &output)
        }
        Command::Sort {
            input,
            column,
            direction,
            types,
            reverse,
            output,
        } => {
            let reader = File::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let out = open_output(output.as_deref())?;
            sort::run_sort(reader, out, column, &direction, &types, &reverse)
        }
    }
}
