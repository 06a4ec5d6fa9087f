//! Error types for content normalization

use thiserror::Error;

/// Result type for normalization
pub type Result<T> = std::result::Result<T, ContentError>;

/// Normalization errors
#[derive(Error, Debug)]
pub enum ContentError {
    /// The payload is not an entity object
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),

    /// Canonical fields did not deserialize
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
