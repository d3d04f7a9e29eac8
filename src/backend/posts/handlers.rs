//! Content HTTP Handlers
//!
//! Post creation and deletion, comments, likes and the four feeds. Errors on
//! this surface are rendered as `{"message": ...}` through [`ContentError`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::db::{self, LikeOutcome, Post};
use crate::backend::auth::users::{following_ids, get_user_by_id, get_user_by_username};
use crate::backend::error::{ApiError, ContentError};
use crate::backend::media::destroy_url;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::validation::non_empty;
use crate::shared::PostView;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub text: Option<String>,
    /// Image payload (data URI or URL) for the media store
    #[serde(alias = "image")]
    pub img: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// `{message, post}` returned by create and comment
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub message: String,
    pub post: PostView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub message: String,
    /// Likes on the post after the toggle
    pub likes: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Parse a post ID from the path; anything unparseable cannot exist
fn parse_post_id(id: &str) -> Result<Uuid, ContentError> {
    Uuid::parse_str(id).map_err(|_| ApiError::not_found("Post not found").into())
}

async fn find_post(state: &AppState, id: &str) -> Result<Post, ContentError> {
    let post_id = parse_post_id(id)?;
    db::get_post_by_id(&state.db, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found").into())
}

async fn post_view(state: &AppState, post: Post) -> Result<PostView, ContentError> {
    db::to_view(&state.db, post)
        .await?
        .ok_or_else(|| ApiError::internal("post owner missing").into())
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostResponse>), ContentError> {
    let Json(request) = payload?;
    let text = non_empty(request.text);
    let img = non_empty(request.img);

    if text.is_none() && img.is_none() {
        return Err(ApiError::validation("Please provide either text or image").into());
    }

    // Upload completes before anything is written.
    let image = match img {
        Some(payload) => Some(state.media.upload(&payload).await?),
        None => None,
    };

    let post = db::create_post(&state.db, auth.user_id, text, image).await?;
    tracing::info!(post = %post.id, "Post created by {}", auth.username);

    let post = post_view(&state, post).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            message: "Post created successfully".to_string(),
            post,
        }),
    ))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ContentError> {
    let post = find_post(&state, &id).await?;

    if post.user_id != auth.user_id {
        return Err(ApiError::forbidden("You are not authorized to delete this post").into());
    }

    if let Some(image) = &post.image {
        destroy_url(state.media.as_ref(), image).await?;
    }

    db::delete_post(&state.db, post.id).await?;
    tracing::info!(post = %post.id, "Post deleted by {}", auth.username);

    Ok(Json(DeleteResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

pub async fn comment_on_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<PostResponse>, ContentError> {
    let Json(request) = payload?;
    let post = find_post(&state, &id).await?;

    let text = non_empty(request.text)
        .ok_or_else(|| ContentError::from(ApiError::validation("Please enter a comment")))?;
    db::add_comment(&state.db, post.id, auth.user_id, &text).await?;
    tracing::debug!(post = %post.id, "Comment added by {}", auth.username);

    let post = db::get_post_by_id(&state.db, post.id)
        .await?
        .ok_or_else(|| ContentError::from(ApiError::not_found("Post not found")))?;
    let post = post_view(&state, post).await?;

    Ok(Json(PostResponse {
        message: "Comment added successfully".to_string(),
        post,
    }))
}

pub async fn like_unlike_post(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, ContentError> {
    let post = find_post(&state, &id).await?;

    let message = match db::toggle_like(&state.db, &post, auth.user_id).await? {
        LikeOutcome::Liked => {
            tracing::info!(post = %post.id, "Post liked by {}", auth.username);
            "Post liked successfully"
        }
        LikeOutcome::Unliked => {
            tracing::info!(post = %post.id, "Post unliked by {}", auth.username);
            "Post unliked successfully"
        }
    };

    let likes = db::get_post_likes(&state.db, post.id).await?;
    Ok(Json(LikeResponse {
        message: message.to_string(),
        likes,
    }))
}

pub async fn get_all_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostView>>, ContentError> {
    let posts = db::get_all_posts(&state.db).await?;
    Ok(Json(db::to_views(&state.db, posts).await?))
}

pub async fn get_following_posts(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<PostView>>, ContentError> {
    let following = following_ids(&state.db, auth.user_id).await?;
    let posts = db::get_posts_by_owners(&state.db, &following).await?;
    Ok(Json(db::to_views(&state.db, posts).await?))
}

pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<PostView>>, ContentError> {
    let user = get_user_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| ContentError::from(ApiError::not_found("User not found")))?;

    let posts = db::get_posts_by_owners(&state.db, &[user.id]).await?;
    Ok(Json(db::to_views(&state.db, posts).await?))
}

pub async fn get_liked_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PostView>>, ContentError> {
    let not_found = || ContentError::from(ApiError::not_found("User not found"));

    let user_id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let user = get_user_by_id(&state.db, user_id).await?.ok_or_else(not_found)?;

    let posts = db::get_liked_posts(&state.db, user.id).await?;
    Ok(Json(db::to_views(&state.db, posts).await?))
}
