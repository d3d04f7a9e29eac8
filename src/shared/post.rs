//! Post and Comment Representations
//!
//! Posts are returned with their owner and every comment author resolved to
//! a [`PublicUser`]. Likes are a list of user identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::user::PublicUser;

/// A comment embedded in a post, in append order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    /// Comment author
    pub user: PublicUser,
    pub created_at: DateTime<Utc>,
}

/// A post as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Post owner
    pub user: PublicUser,
    pub text: Option<String>,
    /// Image URL issued by the media store
    pub image: Option<String>,
    pub comments: Vec<CommentView>,
    /// Users who liked the post
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
