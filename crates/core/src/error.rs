//! Error types for the housing analysis.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the housing analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input text (university listing, quarter labels, numbers).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Expected columns are absent from a table.
    #[error("Schema error: {0}")]
    Schema(String),

    /// The requested result is not defined for this data
    /// (no recession, empty test partition).
    #[error("Undefined result: {0}")]
    Undefined(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Error::Schema(msg.into())
    }

    /// Create an undefined-result error.
    pub fn undefined(msg: impl Into<String>) -> Self {
        Error::Undefined(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Whether this error reports an undefined result rather than bad input.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Error::Undefined(_))
    }
}
