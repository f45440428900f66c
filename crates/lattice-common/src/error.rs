//! Error types for LatticeDB.

use thiserror::Error;

/// Result type alias using LatticeError.
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Errors that can occur in LatticeDB operations.
#[derive(Debug, Error)]
pub enum LatticeError {
    // Index errors
    #[error("Duplicate key")]
    DuplicateKey,

    #[error("Index corrupted: {0}")]
    IndexCorrupted(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },
}
