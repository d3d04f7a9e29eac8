//! Database operations for notifications
//!
//! Rows are only ever inserted (inside the follow/like toggle transactions)
//! and have their read flag flipped. Nothing deletes them.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::load_public_users;
use crate::shared::{NotificationKind, NotificationView, UserSummary};

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    from_user: Uuid,
    to_user: Uuid,
    post_id: Option<Uuid>,
    kind: String,
    read: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A notification about to be recorded
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub from: Uuid,
    pub to: Uuid,
    pub post: Option<Uuid>,
    pub kind: NotificationKind,
}

/// Insert a notification on an open connection or transaction
pub async fn insert_notification(
    conn: &mut SqliteConnection,
    notification: NewNotification,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO notifications (id, from_user, to_user, post_id, kind, read, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(id)
    .bind(notification.from)
    .bind(notification.to)
    .bind(notification.post)
    .bind(notification.kind.as_str())
    .bind(now)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(id)
}

/// Notifications addressed to `user_id`, newest first
pub async fn get_notifications_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<NotificationView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, NotificationRow>(
        r#"
        SELECT id, from_user, to_user, post_id, kind, read, created_at, updated_at
        FROM notifications
        WHERE to_user = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut senders: Vec<Uuid> = rows.iter().map(|r| r.from_user).collect();
    senders.sort_unstable();
    senders.dedup();
    let senders = load_public_users(pool, &senders).await?;

    let notifications = rows
        .into_iter()
        .filter_map(|row| {
            let Some(kind) = NotificationKind::parse(&row.kind) else {
                tracing::warn!(id = %row.id, kind = %row.kind, "Skipping notification with unknown kind");
                return None;
            };
            let from = senders.get(&row.from_user).map(UserSummary::from)?;
            Some(NotificationView {
                id: row.id,
                from,
                to: row.to_user,
                post: row.post_id,
                kind,
                read: row.read,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        })
        .collect();

    Ok(notifications)
}

/// Mark every unread notification of `user_id` as read, returning how many changed
pub async fn mark_all_read(pool: &SqlitePool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE notifications SET read = 1, updated_at = ? WHERE to_user = ? AND read = 0",
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
