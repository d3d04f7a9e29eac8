//! Database operations for posts, comments and likes
//!
//! Feed queries return bare [`Post`] rows; [`to_views`] resolves owners,
//! comments and likes for a whole page in a fixed number of queries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::{load_public_users, push_id_list};
use crate::backend::notifications::db::{insert_notification, NewNotification};
use crate::shared::{CommentView, NotificationKind, PostView};

/// A row of the `posts` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    /// Owner, immutable
    pub user_id: Uuid,
    pub text: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

const POST_COLUMNS: &str = "p.id, p.user_id, p.text, p.image, p.created_at, p.updated_at";

pub async fn create_post(
    pool: &SqlitePool,
    user_id: Uuid,
    text: Option<String>,
    image: Option<String>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, user_id, text, image, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, text, image, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(text)
    .bind(image)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn get_post_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a post; its comments and likes go with it
pub async fn delete_post(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Append a comment to a post
pub async fn add_comment(
    pool: &SqlitePool,
    post_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO post_comments (id, post_id, user_id, text, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(user_id)
    .bind(text)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE posts SET updated_at = ? WHERE id = ?")
        .bind(now)
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}

/// Flip `user_id`'s like on `post`.
///
/// Runs in one transaction: the like is deleted if present, otherwise it is
/// inserted together with a `like` notification for the post owner.
pub async fn toggle_like(
    pool: &SqlitePool,
    post: &Post,
    user_id: Uuid,
) -> Result<LikeOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
        .bind(post.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed > 0 {
        tx.commit().await?;
        return Ok(LikeOutcome::Unliked);
    }

    sqlx::query("INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(post.id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

    insert_notification(
        &mut *tx,
        NewNotification {
            from: user_id,
            to: post.user_id,
            post: Some(post.id),
            kind: NotificationKind::Like,
        },
    )
    .await?;

    tx.commit().await?;
    Ok(LikeOutcome::Liked)
}

/// IDs of the users who like `post_id`, in like order
pub async fn get_post_likes(pool: &SqlitePool, post_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT user_id FROM post_likes WHERE post_id = ? ORDER BY created_at, rowid",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Every post, newest first
pub async fn get_all_posts(pool: &SqlitePool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts p ORDER BY p.created_at DESC, p.rowid DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Posts owned by any of `owners`, newest first
pub async fn get_posts_by_owners(
    pool: &SqlitePool,
    owners: &[Uuid],
) -> Result<Vec<Post>, sqlx::Error> {
    if owners.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        QueryBuilder::<Sqlite>::new(format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.user_id IN ("));
    push_id_list(&mut query, owners);
    query.push(" ORDER BY p.created_at DESC, p.rowid DESC");
    let posts = query.build_query_as::<Post>().fetch_all(pool).await?;
    Ok(posts)
}

/// Posts liked by `user_id`, most recently liked first
pub async fn get_liked_posts(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM posts p
        JOIN post_likes l ON l.post_id = p.id
        WHERE l.user_id = ?
        ORDER BY l.created_at DESC, l.rowid DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Resolve owners, comments (with authors) and likes for `posts`,
/// preserving their order
pub async fn to_views(pool: &SqlitePool, posts: Vec<Post>) -> Result<Vec<PostView>, sqlx::Error> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }
    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT id, post_id, user_id, text, created_at FROM post_comments WHERE post_id IN (",
    );
    push_id_list(&mut query, &post_ids);
    query.push(" ORDER BY created_at, rowid");
    let comments = query.build_query_as::<CommentRow>().fetch_all(pool).await?;

    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT post_id, user_id FROM post_likes WHERE post_id IN (");
    push_id_list(&mut query, &post_ids);
    query.push(" ORDER BY created_at, rowid");
    let likes: Vec<(Uuid, Uuid)> = query.build_query_as().fetch_all(pool).await?;

    let mut user_ids: Vec<Uuid> = posts
        .iter()
        .map(|p| p.user_id)
        .chain(comments.iter().map(|c| c.user_id))
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let users = load_public_users(pool, &user_ids).await?;

    let mut comments_by_post: HashMap<Uuid, Vec<CommentView>> = HashMap::new();
    for comment in comments {
        let Some(author) = users.get(&comment.user_id) else {
            tracing::warn!(comment = %comment.id, "Comment author missing, skipping");
            continue;
        };
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(CommentView {
                id: comment.id,
                text: comment.text,
                user: author.clone(),
                created_at: comment.created_at,
            });
    }

    let mut likes_by_post: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (post_id, user_id) in likes {
        likes_by_post.entry(post_id).or_default().push(user_id);
    }

    let views = posts
        .into_iter()
        .filter_map(|post| {
            let Some(owner) = users.get(&post.user_id) else {
                tracing::warn!(post = %post.id, "Post owner missing, skipping");
                return None;
            };
            Some(PostView {
                id: post.id,
                user: owner.clone(),
                text: post.text,
                image: post.image,
                comments: comments_by_post.remove(&post.id).unwrap_or_default(),
                likes: likes_by_post.remove(&post.id).unwrap_or_default(),
                created_at: post.created_at,
                updated_at: post.updated_at,
            })
        })
        .collect();

    Ok(views)
}

/// Single-post convenience wrapper around [`to_views`]
pub async fn to_view(pool: &SqlitePool, post: Post) -> Result<Option<PostView>, sqlx::Error> {
    Ok(to_views(pool, vec![post]).await?.into_iter().next())
}
