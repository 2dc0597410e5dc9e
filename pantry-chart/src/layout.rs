//! Chart geometry and the four scales shared by the detail and overview plots.

use pantry_data::projection::{Point, Projection};

use crate::axis::Axis;
use crate::line;
use crate::scale::{LinearScale, TimeScale};

/// Target pixel spacing between time ticks.
const X_TICK_SPACING: f64 = 80.0;
/// Target pixel spacing between value ticks.
const Y_TICK_SPACING: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel geometry of one chart, derived from its size and font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    /// Height of the detail block, margins included.
    pub height: f64,
    pub margin: Margin,
    pub overview_height: f64,
}

impl Layout {
    pub fn new(width: f64, height: f64, font_size: f64) -> Self {
        let margin = Margin {
            top: font_size,
            right: font_size * 2.0,
            bottom: font_size * 2.5,
            left: font_size * 4.0,
        };
        Self {
            width,
            height,
            margin,
            overview_height: (3.0 * font_size).max(height / 6.0),
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Top edge of the overview plot in root coordinates.
    pub fn overview_top(&self) -> f64 {
        self.height + self.margin.top
    }

    pub fn total_height(&self) -> f64 {
        self.overview_top() + self.overview_height + self.margin.bottom
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleManager {
    /// Full time range, never rescaled; hosts the brush.
    pub overview_x: TimeScale,
    pub overview_y: LinearScale,
    /// Follows the brush selection.
    pub detail_x: TimeScale,
    pub detail_y: LinearScale,
    x_ticks: usize,
    y_ticks: usize,
}

impl ScaleManager {
    pub fn new(projection: &Projection, layout: &Layout) -> Self {
        let x_domain = (projection.bounds.time.0, projection.horizon);
        let value_max = projection.bounds.value.1;
        let y_domain = if value_max > 0.0 && value_max.is_finite() {
            (0.0, value_max)
        } else {
            (0.0, 1.0)
        };

        let y_ticks = ((layout.plot_height() / Y_TICK_SPACING).round() as usize).max(2);
        let mut detail_y = LinearScale::new(y_domain, (layout.plot_height(), 0.0));
        detail_y.nice(y_ticks);

        let x_range = (0.0, layout.plot_width());
        Self {
            overview_x: TimeScale::new(x_domain, x_range),
            overview_y: LinearScale::new(detail_y.domain(), (layout.overview_height, 0.0)),
            detail_x: TimeScale::new(x_domain, x_range),
            detail_y,
            x_ticks: ((layout.plot_width() / X_TICK_SPACING).round() as usize).max(2),
            y_ticks,
        }
    }

    /// Bottom axis for whichever time scale is passed in.
    pub fn x_axis(&self, scale: &TimeScale) -> Axis {
        Axis::bottom(scale, self.x_ticks)
    }

    pub fn y_axis(&self) -> Axis {
        Axis::left(&self.detail_y, self.y_ticks)
    }

    /// Path data for `points`, using the detail scales unless others are given.
    pub fn line(&self, points: &[Point], x: Option<&TimeScale>, y: Option<&LinearScale>) -> String {
        let x = x.unwrap_or(&self.detail_x);
        let y = y.unwrap_or(&self.detail_y);
        line::path(points, |p| (x.apply(p.time), y.apply(p.value)))
    }
}
