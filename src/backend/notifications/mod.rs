//! Notifications Module
//!
//! Follow and like actions leave a notification for the affected user.
//! This module stores them and serves the caller's list.

pub mod db;
pub mod handlers;

pub use handlers::{get_notifications, mark_notifications_read};
