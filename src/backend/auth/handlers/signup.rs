/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * 1. Require every field
 * 2. Validate the email format
 * 3. Reject a taken username or email (409)
 * 4. Enforce the minimum password length
 * 5. Hash the password, create the user, set the session cookie
 *
 * Responds 201 with the public user fields and a message.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tower_cookies::Cookies;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::session_cookie;
use crate::backend::auth::users::{
    create_user, get_user_by_email, get_user_by_username, to_public, NewUser,
};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::SharedError;
use crate::shared::validation::{non_empty, validate_email, validate_password};

pub async fn signup(
    State(state): State<AppState>,
    cookies: Cookies,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(request) = payload?;

    let (Some(full_name), Some(username), Some(email), Some(password)) = (
        non_empty(request.full_name),
        non_empty(request.username),
        non_empty(request.email),
        non_empty(request.password),
    ) else {
        return Err(SharedError::missing("fields", "All fields are required").into());
    };

    tracing::info!("Signup request for username: {username}");

    validate_email(&email)?;

    if get_user_by_username(&state.db, &username).await?.is_some() {
        return Err(ApiError::conflict("Username already exists"));
    }

    if get_user_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::conflict("Email already exists"));
    }

    validate_password(&password)?;

    let password_hash = state.passwords.hash(&password).await?;

    let user = create_user(
        &state.db,
        NewUser {
            full_name,
            username,
            email,
            password_hash,
        },
    )
    .await?;

    let token = state.sessions.issue(user.id)?;
    cookies.add(session_cookie(token, state.config.secure_cookies()));

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    let user = to_public(&state.db, user).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}
