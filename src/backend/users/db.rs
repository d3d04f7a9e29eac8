//! Database operations for the follow graph and suggestions

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::{following_ids, User, USER_COLUMNS};
use crate::backend::notifications::db::{insert_notification, NewNotification};
use crate::shared::NotificationKind;

/// Size of the random sample suggestions are drawn from
const SUGGESTION_SAMPLE: i64 = 10;
/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    Unfollowed,
}

/// Flip the follow edge `follower -> followee`.
///
/// Runs in one transaction: the edge is deleted if present, otherwise it is
/// inserted together with a `follow` notification for the followee.
pub async fn toggle_follow(
    pool: &SqlitePool,
    follower: Uuid,
    followee: Uuid,
) -> Result<FollowOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
        .bind(follower)
        .bind(followee)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed > 0 {
        tx.commit().await?;
        return Ok(FollowOutcome::Unfollowed);
    }

    sqlx::query("INSERT INTO follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)")
        .bind(follower)
        .bind(followee)
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await?;

    insert_notification(
        &mut *tx,
        NewNotification {
            from: follower,
            to: followee,
            post: None,
            kind: NotificationKind::Follow,
        },
    )
    .await?;

    tx.commit().await?;
    Ok(FollowOutcome::Followed)
}

/// Up to [`MAX_SUGGESTIONS`] users drawn from a random sample, excluding
/// `user_id` and everyone they already follow
pub async fn get_suggested_users(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
    let following = following_ids(pool, user_id).await?;

    let sample = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id <> ? ORDER BY RANDOM() LIMIT ?"
    ))
    .bind(user_id)
    .bind(SUGGESTION_SAMPLE)
    .fetch_all(pool)
    .await?;

    Ok(sample
        .into_iter()
        .filter(|user| !following.contains(&user.id))
        .take(MAX_SUGGESTIONS)
        .collect())
}
