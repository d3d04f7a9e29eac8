//! Posts Module
//!
//! Posts with comments and likes, and the feeds built from them. A post is
//! deleted only by its owner; comments and likes are removed with it.

pub mod db;
pub mod handlers;

pub use handlers::{
    comment_on_post, create_post, delete_post, get_all_posts, get_following_posts,
    get_liked_posts, get_user_posts, like_unlike_post,
};
