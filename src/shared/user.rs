//! Public User Representation
//!
//! The JSON shape returned wherever a user is shown to clients. The password
//! digest never appears here; the follow graph and liked posts are flattened
//! into identifier arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as returned by the API (password digest excluded)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique user ID
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Unique handle
    pub username: String,
    /// Unique email address
    pub email: String,
    pub bio: Option<String>,
    pub link: Option<String>,
    /// Profile image URL issued by the media store
    pub profile_img: Option<String>,
    /// Cover image URL issued by the media store
    pub cover_img: Option<String>,
    /// Users following this user
    pub followers: Vec<Uuid>,
    /// Users this user follows
    pub following: Vec<Uuid>,
    /// Posts this user has liked
    pub liked_posts: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact user reference embedded in notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
}

impl From<&PublicUser> for UserSummary {
    fn from(user: &PublicUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            profile_img: user.profile_img.clone(),
        }
    }
}
