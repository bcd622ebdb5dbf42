//! Error types for the hub
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for hub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the hub
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or blank
    #[error("Validation error: {0}")]
    Validation(String),

    /// The acting principal is not allowed to perform the action
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Id lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate email at registration
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No account matches the given email/password pair
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The email is on the ban list
    #[error("Account is banned: {0}")]
    Banned(String),

    /// Store backend errors
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors from file-backed stores
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a permission error
    pub fn permission(msg: impl Into<String>) -> Self {
        Self::Permission(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a banned error
    pub fn banned(email: impl Into<String>) -> Self {
        Self::Banned(email.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
