/**
 * User Model and Database Operations
 *
 * The `users` row plus the queries that read and write it. The follow graph
 * and liked posts are not columns: they are projections of the `follows` and
 * `post_likes` tables, joined in when a [`PublicUser`] is assembled.
 */

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::PublicUser;

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    pub full_name: String,
    /// Username (unique)
    pub username: String,
    /// Email (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub bio: Option<String>,
    pub link: Option<String>,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an account
#[derive(Debug)]
pub struct NewUser {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

pub(crate) const USER_COLUMNS: &str = "id, full_name, username, email, password_hash, bio, link, \
                            profile_img, cover_img, created_at, updated_at";

/// Create a new user with an empty graph and no media
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, full_name, username, email, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&new_user.full_name)
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Persist the mutable profile fields of `user`
pub async fn update_profile(pool: &SqlitePool, user: &User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET full_name = ?, username = ?, email = ?, bio = ?, link = ?,
            profile_img = ?, cover_img = ?, updated_at = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&user.full_name)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.bio)
    .bind(&user.link)
    .bind(&user.profile_img)
    .bind(&user.cover_img)
    .bind(Utc::now())
    .bind(user.id)
    .fetch_one(pool)
    .await
}

pub async fn update_password(
    pool: &SqlitePool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// IDs of the users `user_id` follows
pub async fn following_ids(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT followee_id FROM follows WHERE follower_id = ? ORDER BY created_at, rowid",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Assemble the public representation of a single user
pub async fn to_public(pool: &SqlitePool, user: User) -> Result<PublicUser, sqlx::Error> {
    let id = user.id;
    let mut graph = load_graph(pool, &[id]).await?;
    Ok(build_public(user, graph.remove(&id).unwrap_or_default()))
}

/// Load public users by ID, keyed by ID. Unknown IDs are skipped.
pub async fn load_public_users(
    pool: &SqlitePool,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, PublicUser>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ("));
    push_id_list(&mut query, ids);
    let users = query.build_query_as::<User>().fetch_all(pool).await?;

    let mut graph = load_graph(pool, ids).await?;
    Ok(users
        .into_iter()
        .map(|user| {
            let edges = graph.remove(&user.id).unwrap_or_default();
            (user.id, build_public(user, edges))
        })
        .collect())
}

/// Public representations of `users`, preserving their order
pub async fn to_public_list(
    pool: &SqlitePool,
    users: Vec<User>,
) -> Result<Vec<PublicUser>, sqlx::Error> {
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let mut graph = load_graph(pool, &ids).await?;
    Ok(users
        .into_iter()
        .map(|user| {
            let edges = graph.remove(&user.id).unwrap_or_default();
            build_public(user, edges)
        })
        .collect())
}

/// Append `(?, ?, ...)` binding every ID, closing the parenthesis
pub(crate) fn push_id_list(query: &mut QueryBuilder<'_, Sqlite>, ids: &[Uuid]) {
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

#[derive(Debug, Default)]
struct UserEdges {
    followers: Vec<Uuid>,
    following: Vec<Uuid>,
    liked_posts: Vec<Uuid>,
}

/// Followers, following and liked posts for every ID in `ids`
async fn load_graph(
    pool: &SqlitePool,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, UserEdges>, sqlx::Error> {
    let mut graph: HashMap<Uuid, UserEdges> = HashMap::new();
    if ids.is_empty() {
        return Ok(graph);
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT follower_id, followee_id FROM follows WHERE follower_id IN (",
    );
    push_id_list(&mut query, ids);
    query.push(" OR followee_id IN (");
    push_id_list(&mut query, ids);
    query.push(" ORDER BY created_at, rowid");
    let edges: Vec<(Uuid, Uuid)> = query.build_query_as().fetch_all(pool).await?;

    let wanted: HashSet<Uuid> = ids.iter().copied().collect();
    for (follower, followee) in edges {
        if wanted.contains(&follower) {
            graph.entry(follower).or_default().following.push(followee);
        }
        if wanted.contains(&followee) {
            graph.entry(followee).or_default().followers.push(follower);
        }
    }

    let mut query =
        QueryBuilder::<Sqlite>::new("SELECT user_id, post_id FROM post_likes WHERE user_id IN (");
    push_id_list(&mut query, ids);
    query.push(" ORDER BY created_at, rowid");
    let likes: Vec<(Uuid, Uuid)> = query.build_query_as().fetch_all(pool).await?;

    for (user_id, post_id) in likes {
        graph.entry(user_id).or_default().liked_posts.push(post_id);
    }

    Ok(graph)
}

fn build_public(user: User, edges: UserEdges) -> PublicUser {
    PublicUser {
        id: user.id,
        full_name: user.full_name,
        username: user.username,
        email: user.email,
        bio: user.bio,
        link: user.link,
        profile_img: user.profile_img,
        cover_img: user.cover_img,
        followers: edges.followers,
        following: edges.following,
        liked_posts: edges.liked_posts,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}
