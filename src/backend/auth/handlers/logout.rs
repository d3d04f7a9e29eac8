/**
 * Logout Handler
 *
 * POST /api/auth/logout
 *
 * Overwrites the session cookie with an expired one. Tokens are stateless,
 * so nothing is recorded server-side and the call always succeeds.
 */

use axum::{extract::State, response::Json};
use tower_cookies::Cookies;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::sessions::expired_session_cookie;
use crate::backend::server::state::AppState;

pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Json<MessageResponse> {
    cookies.add(expired_session_cookie(state.config.secure_cookies()));
    tracing::debug!("Session cookie cleared");
    Json(MessageResponse::ok("User logged out successfully"))
}
