//! Brush selection over the overview plot.
//!
//! The selection is kept in time units so the detail view can take it as its
//! domain directly; pixels only appear at the event boundary.

use pantry_data::projection::MS_PER_DAY;

use crate::scale::TimeScale;

/// Days before the latest record shown by the default window.
pub const DEFAULT_DAYS_BEFORE: f64 = 4.0;
/// Days after the latest record shown by the default window.
pub const DEFAULT_DAYS_AFTER: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushState {
    Idle,
    /// Drawing a new selection from `anchor`.
    Select { anchor: f64 },
    /// Dragging an existing selection grabbed at `grab`.
    Move { grab: f64, origin: (f64, f64) },
}

/// `[latest - 4 days, latest + 3 days]` clamped to `domain`.
pub fn default_window(latest: f64, domain: (f64, f64)) -> (f64, f64) {
    let start = (latest - DEFAULT_DAYS_BEFORE * MS_PER_DAY).max(domain.0);
    let end = (latest + DEFAULT_DAYS_AFTER * MS_PER_DAY).min(domain.1);
    (start, end.max(start))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrushController {
    state: BrushState,
    selection: (f64, f64),
    default: (f64, f64),
}

impl BrushController {
    pub fn new(default: (f64, f64)) -> Self {
        Self {
            state: BrushState::Idle,
            selection: default,
            default,
        }
    }

    pub fn state(&self) -> BrushState {
        self.state
    }

    /// The committed (or in-progress) selection in milliseconds.
    pub fn selection(&self) -> (f64, f64) {
        self.selection
    }

    pub fn pixels(&self, overview_x: &TimeScale) -> (f64, f64) {
        (
            overview_x.apply(self.selection.0),
            overview_x.apply(self.selection.1),
        )
    }

    fn time_at(overview_x: &TimeScale, px: f64) -> f64 {
        let (r0, r1) = overview_x.range();
        overview_x.invert(px.clamp(r0.min(r1), r0.max(r1)))
    }

    pub fn start(&mut self, px: f64, overview_x: &TimeScale) {
        let t = Self::time_at(overview_x, px);
        let (a, b) = self.selection;
        if b > a && t >= a && t <= b {
            self.state = BrushState::Move {
                grab: t,
                origin: self.selection,
            };
        } else {
            self.state = BrushState::Select { anchor: t };
            self.selection = (t, t);
        }
    }

    /// Returns false when no brush gesture is in progress.
    pub fn drag(&mut self, px: f64, overview_x: &TimeScale) -> bool {
        let t = Self::time_at(overview_x, px);
        match self.state {
            BrushState::Idle => return false,
            BrushState::Select { anchor } => {
                self.selection = (anchor.min(t), anchor.max(t));
            }
            BrushState::Move { grab, origin } => {
                let (lo, hi) = overview_x.domain();
                let width = origin.1 - origin.0;
                let start = (origin.0 + t - grab).clamp(lo, (hi - width).max(lo));
                self.selection = (start, start + width);
            }
        }
        true
    }

    /// Finish the gesture. An empty selection reverts to the default window;
    /// returns true when that happened.
    pub fn end(&mut self, px: f64, overview_x: &TimeScale) -> bool {
        if !self.drag(px, overview_x) {
            return false;
        }
        self.state = BrushState::Idle;
        if self.selection.1 <= self.selection.0 {
            self.selection = self.default;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f64 = MS_PER_DAY;

    fn overview() -> TimeScale {
        TimeScale::new((0.0, 20.0 * DAY), (0.0, 200.0))
    }

    #[test]
    fn test_default_window_clamps_to_domain() {
        assert_eq!(default_window(10.0 * DAY, (0.0, 20.0 * DAY)), (6.0 * DAY, 13.0 * DAY));
        assert_eq!(default_window(2.0 * DAY, (0.0, 4.0 * DAY)), (0.0, 4.0 * DAY));
    }

    #[test]
    fn test_select_new_range() {
        let x = overview();
        let mut brush = BrushController::new((6.0 * DAY, 13.0 * DAY));
        brush.start(10.0, &x);
        assert!(brush.drag(30.0, &x));
        assert!(!brush.end(40.0, &x));
        let (a, b) = brush.selection();
        assert!((a - DAY).abs() < 1.0);
        assert!((b - 4.0 * DAY).abs() < 1.0);
        assert_eq!(brush.state(), BrushState::Idle);
    }

    #[test]
    fn test_move_keeps_width_inside_domain() {
        let x = overview();
        let mut brush = BrushController::new((6.0 * DAY, 13.0 * DAY));
        brush.start(100.0, &x);
        brush.drag(500.0, &x);
        brush.end(500.0, &x);
        assert_eq!(brush.selection(), (13.0 * DAY, 20.0 * DAY));
    }

    #[test]
    fn test_collapsed_selection_resets() {
        let x = overview();
        let mut brush = BrushController::new((6.0 * DAY, 13.0 * DAY));
        brush.start(10.0, &x);
        assert!(brush.end(10.0, &x));
        assert_eq!(brush.selection(), (6.0 * DAY, 13.0 * DAY));
    }

    #[test]
    fn test_moves_without_gesture_are_ignored() {
        let x = overview();
        let mut brush = BrushController::new((6.0 * DAY, 13.0 * DAY));
        assert!(!brush.drag(50.0, &x));
        assert!(!brush.end(50.0, &x));
        assert_eq!(brush.selection(), (6.0 * DAY, 13.0 * DAY));
    }
}
