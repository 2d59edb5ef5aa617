//! Error types for setpoint-core

use thiserror::Error;

/// Result type alias using setpoint-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in setpoint-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Local database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote store rejected the request
    #[error("Store API error: {0}")]
    Api(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
