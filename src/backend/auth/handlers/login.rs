/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * Looks the user up by username and verifies the password. When the user
 * does not exist the password is still checked against a fallback digest so
 * both failure paths take comparable time. Either failure is reported as the
 * same 401.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use tower_cookies::Cookies;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::session_cookie;
use crate::backend::auth::users::{get_user_by_username, to_public};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(request) = payload?;
    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    tracing::info!("Login request for: {username}");

    let user = get_user_by_username(&state.db, &username).await?;

    let valid = state
        .passwords
        .verify_or_fallback(&password, user.as_ref().map(|u| u.password_hash.as_str()))
        .await?;

    let user = match user {
        Some(user) if valid => user,
        _ => return Err(ApiError::unauthenticated(INVALID_CREDENTIALS)),
    };

    let token = state.sessions.issue(user.id)?;
    cookies.add(session_cookie(token, state.config.secure_cookies()));

    tracing::info!("User logged in successfully: {} ({})", user.username, user.id);

    let user = to_public(&state.db, user).await?;
    Ok(Json(AuthResponse {
        message: "User logged in successfully".to_string(),
        user,
    }))
}
