use thiserror::Error;

/// Main error type for the configuration and I/O layers.
///
/// The scoring and ranking operations themselves are total and never
/// return this type.
#[derive(Error, Debug)]
pub enum FuzzError {
    /// Score cutoff is NaN or outside [0, 100]
    #[error("Invalid score cutoff: {0} (expected a value in 0..=100)")]
    InvalidCutoff(f64),

    /// Scorer name not recognised
    #[error("Unknown scorer: {0}")]
    UnknownScorer(String),

    /// Processor name not recognised
    #[error("Unknown processor: {0}")]
    UnknownProcessor(String),

    /// Any other invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File or stream errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for FuzzError {
    fn from(s: String) -> Self {
        FuzzError::Other(s)
    }
}

impl From<&str> for FuzzError {
    fn from(s: &str) -> Self {
        FuzzError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FuzzError>;
