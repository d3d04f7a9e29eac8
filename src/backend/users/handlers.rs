//! Account HTTP Handlers
//!
//! Profiles, the follow graph, suggestions, profile updates and password
//! changes. Everything except the profile lookup acts on the caller.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::db::{self, FollowOutcome};
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::auth::users::{
    self, get_user_by_email, get_user_by_id, get_user_by_username, to_public, to_public_list,
};
use crate::backend::error::ApiError;
use crate::backend::media::destroy_url;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::validation::{non_empty, validate_email, validate_password};
use crate::shared::{PublicUser, SharedError};

/// Profile update; omitted or empty fields keep their stored value
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
    /// Image payload (data URI or URL) for the media store
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = get_user_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(to_public(&state.db, user).await?))
}

pub async fn follow_unfollow_user(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let target_id = Uuid::parse_str(&id).map_err(|_| ApiError::not_found("User not found"))?;
    if target_id == auth.user_id {
        return Err(ApiError::validation("You cant follow or unfollow yourself"));
    }

    let target = get_user_by_id(&state.db, target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let message = match db::toggle_follow(&state.db, auth.user_id, target.id).await? {
        FollowOutcome::Followed => {
            tracing::info!("{} followed {}", auth.username, target.username);
            "User followed successfully"
        }
        FollowOutcome::Unfollowed => {
            tracing::info!("{} unfollowed {}", auth.username, target.username);
            "User unfollowed successfully"
        }
    };

    Ok(Json(MessageResponse::ok(message)))
}

pub async fn get_suggested_users(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let suggested = db::get_suggested_users(&state.db, auth.user_id).await?;
    Ok(Json(to_public_list(&state.db, suggested).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<PublicUser>, ApiError> {
    let Json(request) = payload?;

    let mut user = get_user_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(email) = non_empty(request.email) {
        if email != user.email {
            validate_email(&email)?;
            if get_user_by_email(&state.db, &email).await?.is_some() {
                return Err(ApiError::conflict("Email already exists"));
            }
            user.email = email;
        }
    }

    if let Some(username) = non_empty(request.username) {
        if username != user.username {
            if get_user_by_username(&state.db, &username).await?.is_some() {
                return Err(ApiError::conflict("Username already exists"));
            }
            user.username = username;
        }
    }

    if let Some(full_name) = non_empty(request.full_name) {
        user.full_name = full_name;
    }
    if let Some(bio) = non_empty(request.bio) {
        user.bio = Some(bio);
    }
    if let Some(link) = non_empty(request.link) {
        user.link = Some(link);
    }

    if let Some(payload) = non_empty(request.profile_img) {
        if let Some(previous) = user.profile_img.take() {
            destroy_url(state.media.as_ref(), &previous).await?;
        }
        user.profile_img = Some(state.media.upload(&payload).await?);
    }

    if let Some(payload) = non_empty(request.cover_img) {
        if let Some(previous) = user.cover_img.take() {
            destroy_url(state.media.as_ref(), &previous).await?;
        }
        user.cover_img = Some(state.media.upload(&payload).await?);
    }

    let user = users::update_profile(&state.db, &user).await?;
    tracing::info!("Profile updated: {} ({})", user.username, user.id);

    Ok(Json(to_public(&state.db, user).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;

    let (Some(current), Some(new)) = (
        non_empty(request.current_password),
        non_empty(request.new_password),
    ) else {
        return Err(SharedError::missing(
            "password",
            "Current and new password are required",
        )
        .into());
    };

    let user = get_user_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !state.passwords.verify(&current, &user.password_hash).await? {
        return Err(ApiError::validation("Current password is incorrect"));
    }

    validate_password(&new)?;

    let digest = state.passwords.hash(&new).await?;
    users::update_password(&state.db, user.id, &digest).await?;
    tracing::info!("Password changed for {}", user.username);

    Ok(Json(MessageResponse::ok("Password updated successfully")))
}
