use thiserror::Error;

/// Errors raised while building a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The render target could not create an element
    #[error("Failed to create <{tag}> element: {reason}")]
    CreateElement { tag: String, reason: String },

    /// A node id that the render target does not know
    #[error("Unknown node {0}")]
    UnknownNode(usize),
}

pub type Result<T> = std::result::Result<T, ChartError>;
