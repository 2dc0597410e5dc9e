//! The drawing surface a chart renders into.
//!
//! The chart engine never touches a DOM directly. It asks a `RenderTarget`
//! for the container's size and font metrics, creates elements through it and
//! writes attributes by node id. `SvgDocument` is the in-memory implementation;
//! the browser implementation lives in `pantry-web`.

use crate::error::Result;

/// Handle to an element created by a render target.
///
/// Ids are never reused, so a handle held by the renderer keeps pointing at
/// the same element for the lifetime of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

pub trait RenderTarget {
    /// Width and height of the hosting container in pixels.
    fn size(&self) -> (f64, f64);

    /// Font size of the hosting container in pixels.
    fn font_size(&self) -> f64;

    /// Create a detached root element.
    fn create_root(&mut self, tag: &str) -> Result<NodeId>;

    /// Create an element as the last child of `parent`.
    fn append(&mut self, parent: NodeId, tag: &str) -> Result<NodeId>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    fn set_text(&mut self, node: NodeId, text: &str);

    /// Move a node to the end of its parent's children so it draws on top.
    fn raise(&mut self, node: NodeId);

    /// Remove and discard every child of `node`.
    fn clear(&mut self, node: NodeId);
}
