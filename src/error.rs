//! Error types for the pagelens crate

use thiserror::Error;

/// Result type for pagelens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pagelens operations
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page fetch error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
