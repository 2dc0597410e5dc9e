//! In-memory SVG element tree implementing `RenderTarget`.
//!
//! Used by the command line tool to write charts to files and by tests to
//! inspect what the chart drew.

use crate::error::{ChartError, Result};
use crate::target::{NodeId, RenderTarget};

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    removed: bool,
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    nodes: Vec<Element>,
    width: f64,
    height: f64,
    font_size: f64,
}

impl SvgDocument {
    /// A document whose "container" reports the given size and a 10px font.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            width,
            height,
            font_size: 10.0,
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    fn live(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).filter(|e| !e.removed)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.live(node).map(|e| e.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.live(node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.live(node)?.text.as_deref()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.live(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live(node)?.parent
    }

    /// Live descendants of `node` with the given tag, in document order.
    pub fn find_all(&self, node: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        for &child in self.children(node) {
            if self.tag(child) == Some(tag) {
                found.push(child);
            }
            found.extend(self.find_all(child, tag));
        }
        found
    }

    /// Serialize the subtree rooted at `node` as XML.
    pub fn render(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let Some(element) = self.live(node) else {
            return;
        };
        out.push('<');
        out.push_str(&element.tag);
        if element.parent.is_none() && element.tag == "svg" {
            out.push_str(" xmlns=\"http://www.w3.org/2000/svg\"");
        }
        for (name, value) in &element.attrs {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if element.children.is_empty() && element.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &element.text {
            out.push_str(&escape(text));
        }
        for &child in &element.children {
            self.write_node(child, out);
        }
        out.push_str(&format!("</{}>", element.tag));
    }

    fn discard(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(node.0) {
            Some(e) => {
                e.removed = true;
                std::mem::take(&mut e.children)
            }
            None => return,
        };
        for child in children {
            self.discard(child);
        }
    }

    fn push(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
            parent,
            removed: false,
        });
        id
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl RenderTarget for SvgDocument {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn create_root(&mut self, tag: &str) -> Result<NodeId> {
        Ok(self.push(tag, None))
    }

    fn append(&mut self, parent: NodeId, tag: &str) -> Result<NodeId> {
        if self.live(parent).is_none() {
            return Err(ChartError::UnknownNode(parent.0));
        }
        let id = self.push(tag, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.nodes.get_mut(node.0).filter(|e| !e.removed) {
            match e.attrs.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => e.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.nodes.get_mut(node.0).filter(|e| !e.removed) {
            e.text = Some(text.to_string());
        }
    }

    fn raise(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        let siblings = &mut self.nodes[parent.0].children;
        siblings.retain(|&c| c != node);
        siblings.push(node);
    }

    fn clear(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(node.0) {
            Some(e) if !e.removed => std::mem::take(&mut e.children),
            _ => return,
        };
        for child in children {
            self.discard(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_render() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        let root = doc.create_root("svg").unwrap();
        let g = doc.append(root, "g").unwrap();
        let text = doc.append(g, "text").unwrap();
        doc.set_attr(g, "class", "axis");
        doc.set_text(text, "a < b");
        assert_eq!(
            doc.render(root),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><g class=\"axis\"><text>a &lt; b</text></g></svg>"
        );
    }

    #[test]
    fn test_raise_moves_to_end() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        let root = doc.create_root("g").unwrap();
        let a = doc.append(root, "path").unwrap();
        let b = doc.append(root, "path").unwrap();
        doc.raise(a);
        assert_eq!(doc.children(root), &[b, a]);
    }

    #[test]
    fn test_clear_discards_subtree() {
        let mut doc = SvgDocument::new(100.0, 50.0);
        let root = doc.create_root("g").unwrap();
        let g = doc.append(root, "g").unwrap();
        let line = doc.append(g, "line").unwrap();
        doc.clear(root);
        assert!(doc.children(root).is_empty());
        assert_eq!(doc.tag(line), None);
        assert!(doc.append(g, "text").is_err());
    }
}
