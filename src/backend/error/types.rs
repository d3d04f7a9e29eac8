/**
 * Backend Error Types
 *
 * `ApiError` is the error every handler returns. Each variant maps to one
 * HTTP status; wrapped library errors are always internal, except a unique
 * constraint violation from the database, which is reported as a conflict.
 *
 * # Status Code Mapping
 *
 * - `Validation` - 400 Bad Request
 * - `Unauthenticated` - 401 Unauthorized
 * - `Forbidden` - 403 Forbidden
 * - `NotFound` - 404 Not Found
 * - `Conflict` - 409 Conflict
 * - `Internal` and wrapped errors - 500 Internal Server Error
 *
 * Handlers on the post surface return `ContentError`, which carries the same
 * classification but renders its body under a `message` key.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::passwords::PasswordError;
use crate::backend::auth::sessions::SessionError;
use crate::backend::media::MediaError;
use crate::shared::SharedError;

/// Message sent to clients for every internal failure
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Handler-boundary error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or unacceptable input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing, invalid or expired session, or bad credentials
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed to touch the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation (username, email)
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this is a database unique constraint violation
    fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            _ if self.is_unique_violation() => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to API clients
    ///
    /// Internal details stay in the server log.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::Unauthenticated(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.clone(),
            _ if self.is_unique_violation() => "Resource already exists".to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        Self::Validation(err.message().to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Error returned by post handlers; rendered as `{"message": ...}`
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ContentError(pub ApiError);

impl ContentError {
    pub fn status_code(&self) -> StatusCode {
        self.0.status_code()
    }

    pub fn message(&self) -> String {
        self.0.message()
    }
}

impl From<ApiError> for ContentError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<sqlx::Error> for ContentError {
    fn from(err: sqlx::Error) -> Self {
        Self(ApiError::Database(err))
    }
}

impl From<JsonRejection> for ContentError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection.into())
    }
}

impl From<MediaError> for ContentError {
    fn from(err: MediaError) -> Self {
        Self(ApiError::Media(err))
    }
}
