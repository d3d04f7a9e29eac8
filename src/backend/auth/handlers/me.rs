/**
 * Get Current User Handler
 *
 * GET /api/auth/me
 *
 * Returns the public fields of the user the session belongs to. Runs behind
 * the auth gate, so the user is already known to exist.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::users::{get_user_by_id, to_public};
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::PublicUser;

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = get_user_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(to_public(&state.db, user).await?))
}
