//! Error types for recipe store operations.

use thiserror::Error;

/// Errors that can occur during recipe store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No recipe is stored under this name.
    #[error("recipe not found: {name}")]
    NotFound { name: String },

    /// A recipe with this name already exists and overwriting was refused.
    #[error("recipe already exists: {name}")]
    DuplicateName { name: String },

    /// The stored record could not be decoded into a recipe.
    #[error("recipe {name} is corrupt: {reason}")]
    CorruptData { name: String, reason: String },

    /// The recipe name cannot be used as a store key.
    #[error("invalid recipe name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Encoding a recipe failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error during file-based store operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
