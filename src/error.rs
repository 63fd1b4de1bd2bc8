// src/error.rs

//! Unified error handling for the newsbot application.

use std::fmt;

use thiserror::Error;

/// Result type alias for newsbot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content API returned an unusable response
    #[error("API error for {context}: {message}")]
    Api { context: String, message: String },

    /// Webhook rejected the notification
    #[error("Delivery failed with status {status}: {body}")]
    Delivery { status: u16, body: String },

    /// Git commit/push of the ledger failed
    #[error("Commit error: {0}")]
    Commit(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an API error with context.
    pub fn api(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Api {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a commit error.
    pub fn commit(message: impl Into<String>) -> Self {
        Self::Commit(message.into())
    }
}
