//! `RenderTarget` over live DOM elements.

use pantry_chart::{ChartError, NodeId, RenderTarget};
use web_sys::{Document, Element};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const FALLBACK_FONT_SIZE: f64 = 10.0;

/// Parse a computed CSS length such as `"16px"`.
pub fn parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

pub struct DomTarget {
    document: Document,
    container: Element,
    nodes: Vec<Element>,
}

impl DomTarget {
    pub fn new(container: Element) -> Result<Self, ChartError> {
        let document = container
            .owner_document()
            .ok_or_else(|| ChartError::CreateElement {
                tag: "svg".to_string(),
                reason: "container is not attached to a document".to_string(),
            })?;
        Ok(Self {
            document,
            container,
            nodes: Vec::new(),
        })
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn create(&mut self, tag: &str) -> Result<NodeId, ChartError> {
        let element = self
            .document
            .create_element_ns(Some(SVG_NS), tag)
            .map_err(|e| ChartError::CreateElement {
                tag: tag.to_string(),
                reason: format!("{:?}", e),
            })?;
        self.nodes.push(element);
        Ok(NodeId(self.nodes.len() - 1))
    }
}

impl RenderTarget for DomTarget {
    fn size(&self) -> (f64, f64) {
        (
            self.container.client_width() as f64,
            self.container.client_height() as f64,
        )
    }

    fn font_size(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.get_computed_style(&self.container).ok().flatten())
            .and_then(|style| style.get_property_value("font-size").ok())
            .and_then(|v| parse_px(&v))
            .unwrap_or(FALLBACK_FONT_SIZE)
    }

    fn create_root(&mut self, tag: &str) -> Result<NodeId, ChartError> {
        self.create(tag)
    }

    fn append(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, ChartError> {
        let parent_element = self
            .element(parent)
            .cloned()
            .ok_or(ChartError::UnknownNode(parent.0))?;
        let node = self.create(tag)?;
        parent_element
            .append_child(&self.nodes[node.0])
            .map_err(|e| ChartError::CreateElement {
                tag: tag.to_string(),
                reason: format!("{:?}", e),
            })?;
        Ok(node)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            if let Err(e) = element.set_attribute(name, value) {
                log::warn!("dom: could not set {}: {:?}", name, e);
            }
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn raise(&mut self, node: NodeId) {
        if let Some(element) = self.element(node) {
            if let Some(parent) = element.parent_node() {
                let _ = parent.append_child(element);
            }
        }
    }

    fn clear(&mut self, node: NodeId) {
        if let Some(element) = self.element(node) {
            while let Some(child) = element.first_child() {
                let _ = element.remove_child(&child);
            }
        }
    }
}
