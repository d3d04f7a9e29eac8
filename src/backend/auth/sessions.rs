/**
 * Session Management and JWT Tokens
 *
 * Sessions are stateless: a signed JWT carrying the user ID, stored in an
 * HTTP-only cookie named `jwt`. There is no server-side revocation list, so
 * a token stays valid until it expires; logout only tells the client to drop
 * the cookie.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_cookies::cookie::{time, SameSite};
use tower_cookies::Cookie;
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "jwt";

/// Session lifetime in days (token expiry and cookie max-age)
pub const SESSION_DAYS: i64 = 15;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to sign session token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, malformed token or expired
    #[error("Invalid session token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Session token subject is not a user ID")]
    BadSubject,
}

/// Mints and verifies session tokens with the shared secret
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::days(SESSION_DAYS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Create a signed token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(SessionError::Sign)
    }

    /// Verify signature and expiry, returning the embedded user ID
    pub fn verify(&self, token: &str) -> Result<Uuid, SessionError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(SessionError::Invalid)?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| SessionError::BadSubject)
    }
}

/// Build the session cookie for a freshly issued token
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::days(SESSION_DAYS))
        .path("/")
        .build()
}

/// Empty session cookie with a zero max-age, telling the client to drop it
pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .path("/")
        .build()
}
