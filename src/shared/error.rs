//! Shared Error Types
//!
//! This module defines error types produced by the request validation helpers.
//! They are independent of the HTTP layer and are converted into `ApiError`
//! at the handler boundary.
//!
//! # Error Categories
//!
//! - `ValidationError` - Input validation failures (bad email, short password)
//! - `MissingField` - A required request field was absent or blank
//!
//! # Usage
//!
//! ```rust
//! use socialhub::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid Email Format");
//! assert_eq!(error.message(), "Invalid Email Format");
//! ```
use thiserror::Error;

/// Shared error types raised while validating client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A required field was not supplied
    #[error("Missing required field '{field}'")]
    MissingField {
        /// The field that was missing
        field: String,
        /// Client-facing message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new missing-field error
    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The message shown to API clients
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::MissingField { message, .. } => message,
        }
    }
}
