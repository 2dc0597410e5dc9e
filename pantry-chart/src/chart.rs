//! The chart reducer: owns a render target and explicit interaction state,
//! and applies `ChartEvent`s delivered by an input adapter.

use chrono::{DateTime, Utc};
use pantry_core::Series;
use pantry_data::projection::{project, Projection};

use crate::brush::{default_window, BrushController, BrushState};
use crate::context::IdContext;
use crate::error::Result;
use crate::hover::{self, Anchor};
use crate::layout::{Layout, ScaleManager};
use crate::palette;
use crate::renderer::Renderer;
use crate::target::{NodeId, RenderTarget};

pub const DEFAULT_HEIGHT: f64 = 400.0;
/// Used when the container reports no width.
pub const DEFAULT_WIDTH: f64 = 640.0;

/// Explicit size overrides. Missing values come from the render target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Input events, in root-element pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    BrushStart { x: f64 },
    BrushMove { x: f64 },
    BrushEnd { x: f64 },
    PointerEnter,
    PointerMove { x: f64, y: f64 },
    PointerLeave,
}

#[derive(Debug)]
struct ChartState {
    projection: Projection,
    layout: Layout,
    scales: ScaleManager,
    renderer: Renderer,
    brush: BrushController,
    hovered: Option<usize>,
}

pub struct Chart<T: RenderTarget> {
    target: T,
    root: NodeId,
    state: Option<ChartState>,
}

impl<T: RenderTarget> Chart<T> {
    /// Project `series` as of `now` and draw the chart into `target`.
    ///
    /// With no series worth drawing the chart is an empty root element and
    /// `items()` is `None`.
    pub fn new(
        mut target: T,
        series: &[Series],
        now: DateTime<Utc>,
        options: ChartOptions,
        mut ids: IdContext,
    ) -> Result<Self> {
        let Some(projection) = project(series, now) else {
            log::info!("chart: no series with enough records, nothing to draw");
            let root = target.create_root("svg")?;
            return Ok(Self {
                target,
                root,
                state: None,
            });
        };

        let (container_width, _) = target.size();
        let width = options
            .width
            .or(Some(container_width).filter(|w| *w > 0.0))
            .unwrap_or(DEFAULT_WIDTH);
        let height = options.height.unwrap_or(DEFAULT_HEIGHT);
        let layout = Layout::new(width, height, target.font_size());
        let mut scales = ScaleManager::new(&projection, &layout);
        let renderer = Renderer::build(&mut target, &projection, &scales, &layout, &mut ids)?;

        let brush = BrushController::new(default_window(
            projection.bounds.time.1,
            scales.overview_x.domain(),
        ));
        scales.detail_x.set_domain(brush.selection());
        renderer.redraw_detail(&mut target, &projection, &scales)?;
        renderer.draw_brush(&mut target, Some(brush.pixels(&scales.overview_x)));

        log::info!(
            "chart: drew {} series at {}x{}",
            projection.series.len(),
            width,
            height
        );
        Ok(Self {
            target,
            root: renderer.root,
            state: Some(ChartState {
                projection,
                layout,
                scales,
                renderer,
                brush,
                hovered: None,
            }),
        })
    }

    /// The root element to attach to the page.
    pub fn node(&self) -> NodeId {
        self.root
    }

    /// Names of the charted items, unset when nothing was drawn.
    pub fn items(&self) -> Option<Vec<String>> {
        self.state.as_ref().map(|s| s.projection.names())
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.state.as_ref().map(|s| &s.layout)
    }

    /// Current time domain of the detail plot.
    pub fn detail_domain(&self) -> Option<(f64, f64)> {
        self.state.as_ref().map(|s| s.scales.detail_x.domain())
    }

    pub fn hovered(&self) -> Option<usize> {
        self.state.as_ref().and_then(|s| s.hovered)
    }

    /// True while a brush gesture is in progress.
    pub fn brushing(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.brush.state() != BrushState::Idle)
    }

    /// Elements that should receive pointer events: hover surface, brush surface.
    pub fn surfaces(&self) -> Option<(NodeId, NodeId)> {
        self.state
            .as_ref()
            .map(|s| (s.renderer.hover_surface, s.renderer.brush_surface))
    }

    pub fn handle(&mut self, event: ChartEvent) -> Result<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let target = &mut self.target;
        let left = state.layout.margin.left;
        let top = state.layout.margin.top;
        let many = state.projection.series.len() > 1;

        match event {
            ChartEvent::BrushStart { x } => {
                state.brush.start(x - left, &state.scales.overview_x);
                Self::apply_brush(target, state)?;
            }
            ChartEvent::BrushMove { x } => {
                if state.brush.drag(x - left, &state.scales.overview_x) {
                    Self::apply_brush(target, state)?;
                }
            }
            ChartEvent::BrushEnd { x } => {
                if state.brush.state() == BrushState::Idle {
                    return Ok(());
                }
                if state.brush.end(x - left, &state.scales.overview_x) {
                    log::debug!("chart: empty brush, restoring the default window");
                }
                Self::apply_brush(target, state)?;
            }
            ChartEvent::PointerEnter => {
                if many {
                    for i in 0..state.renderer.series.len() {
                        state.renderer.set_color(target, i, palette::NEUTRAL);
                    }
                    state.renderer.set_blend(target, false);
                }
            }
            ChartEvent::PointerMove { x, y } => {
                let hit = hover::nearest(&state.projection, &state.scales, x - left, y - top);
                let Some(hit) = hit else {
                    return Ok(());
                };
                if many && state.hovered != Some(hit.series) {
                    if let Some(previous) = state.hovered {
                        state.renderer.set_color(target, previous, palette::NEUTRAL);
                    }
                    let color = state.renderer.series[hit.series].color;
                    state.renderer.set_color(target, hit.series, color);
                    state.renderer.raise(target, hit.series);
                }
                state.hovered = Some(hit.series);
                let name = &state.projection.series[hit.series].name;
                let anchor = Anchor::for_position(hit.x, state.layout.plot_width());
                state.renderer.show_hover(
                    target,
                    hit.x,
                    hit.y,
                    &hover::label(name, hit.point.value),
                    anchor.as_str(),
                );
            }
            ChartEvent::PointerLeave => {
                for (i, nodes) in state.renderer.series.iter().enumerate() {
                    state.renderer.set_color(target, i, nodes.color);
                }
                state.renderer.set_blend(target, true);
                state.renderer.hide_hover(target);
                state.hovered = None;
            }
        }
        Ok(())
    }

    fn apply_brush(target: &mut T, state: &mut ChartState) -> Result<()> {
        state.scales.detail_x.set_domain(state.brush.selection());
        state
            .renderer
            .redraw_detail(target, &state.projection, &state.scales)?;
        state
            .renderer
            .draw_brush(target, Some(state.brush.pixels(&state.scales.overview_x)));
        Ok(())
    }
}
