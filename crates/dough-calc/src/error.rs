//! Error types for recipe calculation.

use dough_types::TypeError;
use dough_yeast::YeastError;
use thiserror::Error;

/// Errors that abort a calculation. No partial outputs accompany them.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalcError {
    /// A recipe field is outside its allowed range or names an unknown
    /// variant.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A fermentation parameter is non-positive or not a number.
    #[error("{parameter} out of range: {value} (must be a positive number)")]
    OutOfRange { parameter: &'static str, value: f64 },

    /// The yeast model failed for a reason other than its inputs.
    #[error("yeast model error: {0}")]
    Model(String),
}

impl From<YeastError> for CalcError {
    fn from(err: YeastError) -> Self {
        match err {
            YeastError::OutOfRange { parameter, value } => Self::OutOfRange { parameter, value },
            other => Self::Model(other.to_string()),
        }
    }
}

impl From<TypeError> for CalcError {
    fn from(err: TypeError) -> Self {
        let field = match &err {
            TypeError::UnknownVariant { kind, .. } => *kind,
        };
        Self::InvalidInput {
            field,
            reason: err.to_string(),
        }
    }
}

/// Convenience type alias for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;
