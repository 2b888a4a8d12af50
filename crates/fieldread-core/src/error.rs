//! Error types for the fieldread-core library.
//!
//! Extraction itself never fails; these cover the configuration and I/O
//! layers around it.

use thiserror::Error;

/// Main error type for the fieldread library.
#[derive(Error, Debug)]
pub enum FieldreadError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the fieldread library.
pub type Result<T> = std::result::Result<T, FieldreadError>;
