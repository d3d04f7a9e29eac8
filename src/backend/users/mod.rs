//! Users Module
//!
//! Account operations beyond authentication: profiles, the follow graph,
//! suggestions, profile updates and password changes.

pub mod db;
pub mod handlers;

pub use handlers::{
    change_password, follow_unfollow_user, get_suggested_users, get_user_profile, update_profile,
};
