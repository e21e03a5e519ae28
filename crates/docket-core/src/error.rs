//! Centralized error types for Docket.

use thiserror::Error;

/// Main error type for Docket operations.
#[derive(Error, Debug)]
pub enum DocketError {
    #[error("Invalid import data: {0}")]
    ImportFormat(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Database(#[from] docket_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Webhook error: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Docket operations.
pub type DocketResult<T> = Result<T, DocketError>;

impl DocketError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an import format error.
    pub fn import_format(msg: impl Into<String>) -> Self {
        Self::ImportFormat(msg.into())
    }
}
