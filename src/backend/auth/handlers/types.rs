/**
 * Authentication Handler Types
 *
 * Request and response bodies for signup, login and logout. Request fields
 * are optional so that a missing field is reported with a readable message
 * instead of a deserialization failure.
 */

use serde::{Deserialize, Serialize};

use crate::shared::PublicUser;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Plaintext password (hashed before storage, never logged)
    pub password: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Returned by signup and login: the public user fields plus a message
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    #[serde(flatten)]
    pub user: PublicUser,
}

/// Generic `{success, message}` acknowledgement
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
