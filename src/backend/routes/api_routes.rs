/**
 * API Route Handlers
 *
 * # Public
 * - `POST /api/auth/signup`
 * - `POST /api/auth/login`
 * - `POST /api/auth/logout`
 *
 * # Protected (session cookie required)
 * - `GET /api/auth/me`
 * - `GET /api/users/profile/{username}`
 * - `GET /api/users/suggested`
 * - `POST /api/users/follow/{id}`
 * - `POST /api/users/update`
 * - `POST /api/users/changePassword`
 * - `GET /api/posts/getPosts`
 * - `GET /api/posts/getFollowingPosts`
 * - `GET /api/posts/likes/{id}`
 * - `GET /api/posts/userPosts/{username}`
 * - `POST /api/posts/create`
 * - `POST /api/posts/like/{id}`
 * - `POST /api/posts/comment/{id}`
 * - `DELETE /api/posts/delete/{id}`
 * - `GET /api/notifications`
 * - `POST /api/notifications/read`
 */

use axum::routing::{delete, get, post};
use axum::Router;

use crate::backend::auth::{get_me, login, logout, signup};
use crate::backend::notifications::{get_notifications, mark_notifications_read};
use crate::backend::posts::{
    comment_on_post, create_post, delete_post, get_all_posts, get_following_posts,
    get_liked_posts, get_user_posts, like_unlike_post,
};
use crate::backend::server::state::AppState;
use crate::backend::users::{
    change_password, follow_unfollow_user, get_suggested_users, get_user_profile, update_profile,
};

/// Routes reachable without a session
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Routes that must sit behind the auth gate
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/me", get(get_me))
        // Accounts
        .route("/api/users/profile/{username}", get(get_user_profile))
        .route("/api/users/suggested", get(get_suggested_users))
        .route("/api/users/follow/{id}", post(follow_unfollow_user))
        .route("/api/users/update", post(update_profile))
        .route("/api/users/changePassword", post(change_password))
        // Content
        .route("/api/posts/getPosts", get(get_all_posts))
        .route("/api/posts/getFollowingPosts", get(get_following_posts))
        .route("/api/posts/likes/{id}", get(get_liked_posts))
        .route("/api/posts/userPosts/{username}", get(get_user_posts))
        .route("/api/posts/create", post(create_post))
        .route("/api/posts/like/{id}", post(like_unlike_post))
        .route("/api/posts/comment/{id}", post(comment_on_post))
        .route("/api/posts/delete/{id}", delete(delete_post))
        // Notifications
        .route("/api/notifications", get(get_notifications))
        .route("/api/notifications/read", post(mark_notifications_read))
}
