use pantry_core::quantity::trim_decimals;

use crate::error::Result;
use crate::scale::{format_times, LinearScale, TimeScale};
use crate::target::{NodeId, RenderTarget};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub offset: f64,
    pub label: String,
}

/// A computed axis: tick positions and labels, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub orientation: Orientation,
    pub ticks: Vec<Tick>,
    pub range: (f64, f64),
}

/// Large stock figures read better abbreviated.
pub fn format_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        trim_decimals(value, 3)
    }
}

impl Axis {
    pub fn bottom(scale: &TimeScale, count: usize) -> Self {
        let times = scale.ticks(count);
        let ticks = times
            .iter()
            .zip(format_times(&times))
            .map(|(t, label)| Tick {
                offset: scale.apply(*t),
                label,
            })
            .collect();
        Self {
            orientation: Orientation::Bottom,
            ticks,
            range: scale.range(),
        }
    }

    pub fn left(scale: &LinearScale, count: usize) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick {
                offset: scale.apply(v),
                label: format_value(v),
            })
            .collect();
        Self {
            orientation: Orientation::Left,
            ticks,
            range: scale.range(),
        }
    }

    /// Replace everything inside `group` with this axis.
    pub fn draw<T: RenderTarget>(&self, target: &mut T, group: NodeId) -> Result<()> {
        target.clear(group);
        target.set_attr(group, "fill", "none");
        target.set_attr(
            group,
            "text-anchor",
            match self.orientation {
                Orientation::Bottom => "middle",
                Orientation::Left => "end",
            },
        );

        let domain = target.append(group, "path")?;
        target.set_attr(domain, "class", "domain");
        target.set_attr(domain, "stroke", "currentColor");
        let (r0, r1) = self.range;
        let d = match self.orientation {
            Orientation::Bottom => format!("M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}"),
            Orientation::Left => format!("M-{TICK_SIZE},{r0}H0V{r1}H-{TICK_SIZE}"),
        };
        target.set_attr(domain, "d", &d);

        for tick in &self.ticks {
            let g = target.append(group, "g")?;
            target.set_attr(g, "class", "tick");
            let line = target.append(g, "line")?;
            target.set_attr(line, "stroke", "currentColor");
            let text = target.append(g, "text")?;
            target.set_attr(text, "fill", "currentColor");
            target.set_text(text, &tick.label);
            match self.orientation {
                Orientation::Bottom => {
                    target.set_attr(g, "transform", &format!("translate({},0)", tick.offset));
                    target.set_attr(line, "y2", &TICK_SIZE.to_string());
                    target.set_attr(text, "y", &(TICK_SIZE + TICK_PADDING).to_string());
                    target.set_attr(text, "dy", "0.71em");
                }
                Orientation::Left => {
                    target.set_attr(g, "transform", &format!("translate(0,{})", tick.offset));
                    target.set_attr(line, "x2", &(-TICK_SIZE).to_string());
                    target.set_attr(text, "x", &(-(TICK_SIZE + TICK_PADDING)).to_string());
                    target.set_attr(text, "dy", "0.32em");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::SvgDocument;

    #[test]
    fn test_value_labels() {
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(4000.0), "4K");
        assert_eq!(format_value(2_500_000.0), "2.5M");
    }

    #[test]
    fn test_left_axis_ticks() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        let axis = Axis::left(&scale, 5);
        assert!(axis.ticks.len() >= 2);
        assert_eq!(axis.ticks[0].offset, 100.0);
        assert_eq!(axis.ticks.last().map(|t| t.label.as_str()), Some("10"));
        assert_eq!(axis.range, (100.0, 0.0));
    }

    #[test]
    fn test_redraw_replaces_ticks() {
        let mut doc = SvgDocument::new(200.0, 100.0);
        let root = doc.create_root("g").unwrap();
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        Axis::left(&scale, 5).draw(&mut doc, root).unwrap();
        let axis = Axis::left(&scale, 2);
        axis.draw(&mut doc, root).unwrap();
        assert_eq!(doc.find_all(root, "text").len(), axis.ticks.len());
        assert_eq!(doc.find_all(root, "path").len(), 1);
    }
}
