//! Core types for pantry inventory history.
//!
//! - `record`: records and per-item series
//! - `dataset`: the JSON payload served by the inventory backend
//! - `usage`: consumption averages and expected run-out dates
//! - `quantity`: rounding and display of quantities
//! - `since`: "time since" strings

pub mod dataset;
pub mod error;
pub mod quantity;
pub mod record;
pub mod since;
pub mod usage;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use record::{Record, Series};
