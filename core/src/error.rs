use thiserror::Error;

/// Result type for rtdvh operations
pub type Result<T> = std::result::Result<T, DvhError>;

/// Error types for rtdvh operations
#[derive(Error, Debug)]
pub enum DvhError {
    /// Record is missing a required attribute
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Sample index outside the table
    #[error("Index {index} out of range for histogram with {size} samples")]
    IndexOutOfRange { index: usize, size: usize },

    /// Reference volume cannot convert absolute volumes
    #[error("Invalid reference volume: {0}")]
    InvalidReferenceVolume(f64),

    /// Top-level document is neither a record nor a list of records
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// DVH metric string could not be parsed
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    /// JSON syntax or type error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DvhError {
    /// Shorthand for a [`DvhError::MissingField`]
    pub fn missing(field: impl Into<String>) -> Self {
        DvhError::MissingField(field.into())
    }
}
