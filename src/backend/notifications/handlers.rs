//! Notification HTTP Handlers
//!
//! - `GET /api/notifications` - list the caller's notifications
//! - `POST /api/notifications/read` - mark them all as read

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::db;
use crate::backend::error::ApiError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::NotificationView;

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub success: bool,
    /// Number of notifications that were unread
    pub updated: u64,
}

pub async fn get_notifications(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
    let notifications = db::get_notifications_for_user(&state.db, auth.user_id).await?;
    Ok(Json(notifications))
}

pub async fn mark_notifications_read(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let updated = db::mark_all_read(&state.db, auth.user_id).await?;
    tracing::debug!(user = %auth.username, updated, "Marked notifications read");
    Ok(Json(MarkReadResponse {
        success: true,
        updated,
    }))
}
