//! Inventory projection chart engine.
//!
//! A detail plot with history and dashed forecast lines per item, an overview
//! plot hosting a brush that zooms the detail view, and nearest-point hover
//! labels. Everything draws through a [`RenderTarget`]; [`SvgDocument`] is the
//! in-memory one.

pub mod axis;
pub mod brush;
pub mod chart;
pub mod context;
pub mod error;
pub mod hover;
pub mod layout;
pub mod line;
pub mod palette;
pub mod renderer;
pub mod scale;
pub mod svg;
pub mod target;

pub use chart::{Chart, ChartEvent, ChartOptions};
pub use context::IdContext;
pub use error::{ChartError, Result};
pub use svg::SvgDocument;
pub use target::{NodeId, RenderTarget};
