//! Error types for the detection-eval library.

use thiserror::Error;

/// Result type for detection-eval operations.
pub type Result<T> = std::result::Result<T, DetectionEvalError>;

/// Error types that can occur while building datasets or computing metrics.
#[derive(Error, Debug)]
pub enum DetectionEvalError {
    /// Metrics were requested before any labels were loaded.
    #[error("missing labels: there are no labels associated with this detection")]
    MissingLabels,

    /// Metrics were requested before any predictions were loaded.
    #[error("missing predictions: there are no predictions associated with this detection")]
    MissingPredictions,

    /// A flat or positional record had a field count that maps to no input shape.
    #[error("unsupported record arity: {0} fields (expected 6 or 7)")]
    UnsupportedArity(usize),

    /// A textual record field could not be parsed.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Invalid bounding box coordinates or confidence.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Invalid confidence or IoU threshold.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Configuration values that cannot be used.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
