//! Notification Data Structures
//!
//! Notifications are created as a side effect of follow and like actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::user::UserSummary;

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone followed the recipient
    Follow,
    /// Someone liked one of the recipient's posts
    Like,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "follow",
            NotificationKind::Like => "like",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "follow" => Some(NotificationKind::Follow),
            "like" => Some(NotificationKind::Like),
            _ => None,
        }
    }
}

/// A notification as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// The user whose action produced the notification
    pub from: UserSummary,
    /// Recipient user ID
    pub to: Uuid,
    /// Liked post, for `like` notifications
    pub post: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
