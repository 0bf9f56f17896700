//! Error types for the yeast model.

use thiserror::Error;

/// Errors that can occur while loading the table or querying the model.
#[derive(Debug, Error)]
pub enum YeastError {
    /// A fermentation parameter is non-positive or not a number.
    #[error("{parameter} out of range: {value} (must be a positive number)")]
    OutOfRange { parameter: &'static str, value: f64 },

    /// The reference table is structurally invalid.
    #[error("invalid yeast table: {0}")]
    InvalidTable(String),

    /// The reference table could not be parsed.
    #[error("yeast table parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// I/O error while reading a table file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for yeast model operations.
pub type Result<T> = std::result::Result<T, YeastError>;
