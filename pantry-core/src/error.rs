/// Error types for the pantry core library
use thiserror::Error;

/// Main error type for dataset and formatting operations
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset JSON could not be decoded
    #[error("Failed to parse dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),

    /// Timestamp string in an unsupported format
    #[error("Failed to parse timestamp: {0}")]
    TimestampParse(String),

    /// Quantity could not be formatted because it is NaN or infinite
    #[error("{0:?} not a finite number")]
    NonFiniteQuantity(f64),
}

/// Type alias for Results using the pantry core Error
pub type Result<T> = std::result::Result<T, Error>;
