use pantry_core::quantity::trim_decimals;
use pantry_data::projection::{Point, Projection};

use crate::layout::ScaleManager;

/// Horizontal text anchoring for the hover label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    /// Keeps the label inside the plot: left third starts, right third ends.
    pub fn for_position(x: f64, plot_width: f64) -> Self {
        if x < plot_width / 3.0 {
            Anchor::Start
        } else if x < plot_width * 2.0 / 3.0 {
            Anchor::Middle
        } else {
            Anchor::End
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverHit {
    pub series: usize,
    pub point: Point,
    /// Pixel position inside the detail plot.
    pub x: f64,
    pub y: f64,
}

/// Closest historical point or projected endpoint to the pointer, measured in
/// detail-plot pixels with the scales as they are right now.
pub fn nearest(projection: &Projection, scales: &ScaleManager, px: f64, py: f64) -> Option<HoverHit> {
    let mut best: Option<(f64, HoverHit)> = None;
    for (index, series) in projection.series.iter().enumerate() {
        let endpoint = series.endpoint();
        for point in series.history.iter().chain(std::iter::once(&endpoint)) {
            if !point.is_defined() {
                continue;
            }
            let x = scales.detail_x.apply(point.time);
            let y = scales.detail_y.apply(point.value);
            let distance = (x - px).powi(2) + (y - py).powi(2);
            if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((
                    distance,
                    HoverHit {
                        series: index,
                        point: *point,
                        x,
                        y,
                    },
                ));
            }
        }
    }
    best.map(|(_, hit)| hit)
}

pub fn label(name: &str, value: f64) -> String {
    format!("{}: {}", name, trim_decimals(value, 3))
}
