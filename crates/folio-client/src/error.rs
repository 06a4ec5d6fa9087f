//! Error types for the content client

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Content client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend answered with a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body did not have the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Entity could not be normalized
    #[error("Content error: {0}")]
    Content(#[from] folio_content::ContentError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before sending
    #[error("Validation error: {0}")]
    Validation(String),
}
