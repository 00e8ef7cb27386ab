//! Common error types for the FieldOps portal
//!
//! Only the I/O edge (configuration loading, record dumps read by binaries)
//! can fail. Field resolution, classification, list derivation and the
//! view-state bus are total and never return these errors.

use thiserror::Error;

/// Common result type for portal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across portal crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
