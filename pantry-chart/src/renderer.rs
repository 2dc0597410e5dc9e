//! Builds the chart's element tree once and updates geometry in place.

use pantry_data::projection::Projection;

use crate::context::IdContext;
use crate::error::Result;
use crate::layout::{Layout, ScaleManager};
use crate::palette;
use crate::target::{NodeId, RenderTarget};

const BLEND: &str = "mix-blend-mode: multiply";
const DASH: &str = "4,3";

/// Elements belonging to one series. Fixed for the lifetime of the chart.
#[derive(Debug, Clone)]
pub struct SeriesNodes {
    pub color: &'static str,
    pub history: NodeId,
    pub projection: NodeId,
    pub overview_history: NodeId,
    pub overview_projection: NodeId,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    pub root: NodeId,
    pub detail_x_axis: NodeId,
    pub detail_y_axis: NodeId,
    pub overview_x_axis: NodeId,
    pub lines: NodeId,
    pub series: Vec<SeriesNodes>,
    pub hover: NodeId,
    pub hover_marker: NodeId,
    pub hover_label: NodeId,
    /// Receives pointer events for hover tracking.
    pub hover_surface: NodeId,
    /// Receives pointer events for the brush.
    pub brush_surface: NodeId,
    pub brush_selection: NodeId,
}

fn translate(x: f64, y: f64) -> String {
    format!("translate({x},{y})")
}

fn add_clip<T: RenderTarget>(
    target: &mut T,
    defs: NodeId,
    ids: &mut IdContext,
    width: f64,
    height: f64,
) -> Result<String> {
    let id = ids.next("clip");
    let clip = target.append(defs, "clipPath")?;
    target.set_attr(clip, "id", &id);
    let rect = target.append(clip, "rect")?;
    target.set_attr(rect, "width", &width.to_string());
    target.set_attr(rect, "height", &height.to_string());
    Ok(format!("url(#{id})"))
}

fn add_path<T: RenderTarget>(target: &mut T, parent: NodeId, color: &str, dashed: bool) -> Result<NodeId> {
    let path = target.append(parent, "path")?;
    target.set_attr(path, "fill", "none");
    target.set_attr(path, "stroke", color);
    target.set_attr(path, "stroke-width", "1.5");
    target.set_attr(path, "stroke-linejoin", "round");
    target.set_attr(path, "stroke-linecap", "round");
    if dashed {
        target.set_attr(path, "stroke-dasharray", DASH);
    }
    Ok(path)
}

impl Renderer {
    pub fn build<T: RenderTarget>(
        target: &mut T,
        projection: &Projection,
        scales: &ScaleManager,
        layout: &Layout,
        ids: &mut IdContext,
    ) -> Result<Self> {
        let (plot_width, plot_height) = (layout.plot_width(), layout.plot_height());
        let total_height = layout.total_height();

        let root = target.create_root("svg")?;
        target.set_attr(root, "width", &layout.width.to_string());
        target.set_attr(root, "height", &total_height.to_string());
        target.set_attr(root, "viewBox", &format!("0 0 {} {}", layout.width, total_height));
        target.set_attr(root, "style", "max-width: 100%; height: auto;");

        let defs = target.append(root, "defs")?;
        let detail_clip = add_clip(target, defs, ids, plot_width, plot_height)?;
        let overview_clip = add_clip(target, defs, ids, plot_width, layout.overview_height)?;

        // detail plot
        let detail = target.append(root, "g")?;
        target.set_attr(detail, "transform", &translate(layout.margin.left, layout.margin.top));
        let detail_x_axis = target.append(detail, "g")?;
        target.set_attr(detail_x_axis, "transform", &translate(0.0, plot_height));
        let detail_y_axis = target.append(detail, "g")?;
        let lines = target.append(detail, "g")?;
        target.set_attr(lines, "clip-path", &detail_clip);
        target.set_attr(lines, "style", BLEND);

        // overview plot
        let overview = target.append(root, "g")?;
        target.set_attr(overview, "transform", &translate(layout.margin.left, layout.overview_top()));
        let overview_x_axis = target.append(overview, "g")?;
        target.set_attr(overview_x_axis, "transform", &translate(0.0, layout.overview_height));
        let overview_lines = target.append(overview, "g")?;
        target.set_attr(overview_lines, "clip-path", &overview_clip);

        let mut series = Vec::with_capacity(projection.series.len());
        for (i, s) in projection.series.iter().enumerate() {
            let color = palette::color(i);
            let history = add_path(target, lines, color, false)?;
            let projected = add_path(target, lines, color, true)?;
            let overview_history = add_path(target, overview_lines, color, false)?;
            let overview_projection = add_path(target, overview_lines, color, true)?;
            let (ox, oy) = (Some(&scales.overview_x), Some(&scales.overview_y));
            target.set_attr(overview_history, "d", &scales.line(&s.history, ox, oy));
            target.set_attr(overview_projection, "d", &scales.line(&s.projection, ox, oy));
            series.push(SeriesNodes {
                color,
                history,
                projection: projected,
                overview_history,
                overview_projection,
            });
        }

        scales.y_axis().draw(target, detail_y_axis)?;
        scales
            .x_axis(&scales.overview_x)
            .draw(target, overview_x_axis)?;

        let hover = target.append(detail, "g")?;
        target.set_attr(hover, "display", "none");
        let hover_marker = target.append(hover, "circle")?;
        target.set_attr(hover_marker, "r", "2.5");
        let hover_label = target.append(hover, "text")?;
        target.set_attr(hover_label, "y", "-8");

        let hover_surface = target.append(detail, "rect")?;
        target.set_attr(hover_surface, "width", &plot_width.to_string());
        target.set_attr(hover_surface, "height", &plot_height.to_string());
        target.set_attr(hover_surface, "fill", "none");
        target.set_attr(hover_surface, "pointer-events", "all");

        let brush = target.append(overview, "g")?;
        target.set_attr(brush, "class", "brush");
        let brush_surface = target.append(brush, "rect")?;
        target.set_attr(brush_surface, "width", &plot_width.to_string());
        target.set_attr(brush_surface, "height", &layout.overview_height.to_string());
        target.set_attr(brush_surface, "fill", "none");
        target.set_attr(brush_surface, "pointer-events", "all");
        target.set_attr(brush_surface, "cursor", "crosshair");
        let brush_selection = target.append(brush, "rect")?;
        target.set_attr(brush_selection, "height", &layout.overview_height.to_string());
        target.set_attr(brush_selection, "fill", "#777");
        target.set_attr(brush_selection, "fill-opacity", "0.3");
        target.set_attr(brush_selection, "stroke", "#fff");
        target.set_attr(brush_selection, "pointer-events", "none");

        Ok(Self {
            root,
            detail_x_axis,
            detail_y_axis,
            overview_x_axis,
            lines,
            series,
            hover,
            hover_marker,
            hover_label,
            hover_surface,
            brush_surface,
            brush_selection,
        })
    }

    /// Recompute the detail axis and every detail path for the current scales.
    pub fn redraw_detail<T: RenderTarget>(
        &self,
        target: &mut T,
        projection: &Projection,
        scales: &ScaleManager,
    ) -> Result<()> {
        scales.x_axis(&scales.detail_x).draw(target, self.detail_x_axis)?;
        for (nodes, s) in self.series.iter().zip(&projection.series) {
            target.set_attr(nodes.history, "d", &scales.line(&s.history, None, None));
            target.set_attr(nodes.projection, "d", &scales.line(&s.projection, None, None));
        }
        Ok(())
    }

    pub fn draw_brush<T: RenderTarget>(&self, target: &mut T, pixels: Option<(f64, f64)>) {
        match pixels {
            Some((x0, x1)) => {
                target.set_attr(self.brush_selection, "display", "inline");
                target.set_attr(self.brush_selection, "x", &x0.to_string());
                target.set_attr(self.brush_selection, "width", &(x1 - x0).max(0.0).to_string());
            }
            None => target.set_attr(self.brush_selection, "display", "none"),
        }
    }

    pub fn set_color<T: RenderTarget>(&self, target: &mut T, index: usize, color: &str) {
        if let Some(nodes) = self.series.get(index) {
            target.set_attr(nodes.history, "stroke", color);
            target.set_attr(nodes.projection, "stroke", color);
        }
    }

    pub fn raise<T: RenderTarget>(&self, target: &mut T, index: usize) {
        if let Some(nodes) = self.series.get(index) {
            target.raise(nodes.history);
            target.raise(nodes.projection);
        }
    }

    pub fn set_blend<T: RenderTarget>(&self, target: &mut T, enabled: bool) {
        target.set_attr(self.lines, "style", if enabled { BLEND } else { "" });
    }

    pub fn show_hover<T: RenderTarget>(&self, target: &mut T, x: f64, y: f64, label: &str, anchor: &str) {
        target.set_attr(self.hover, "display", "inline");
        target.set_attr(self.hover, "transform", &translate(x, y));
        target.set_attr(self.hover_label, "text-anchor", anchor);
        target.set_text(self.hover_label, label);
    }

    pub fn hide_hover<T: RenderTarget>(&self, target: &mut T) {
        target.set_attr(self.hover, "display", "none");
    }
}
