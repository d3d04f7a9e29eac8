//! Shared Module
//!
//! Wire types returned by the API and the validation helpers used by the
//! handlers. Nothing here touches the database or HTTP layer.

/// Shared error types
pub mod error;

/// Email and password validation
pub mod validation;

/// Public user representation
pub mod user;

/// Post and comment representations
pub mod post;

/// Notification representation
pub mod notification;

pub use error::SharedError;
pub use notification::{NotificationKind, NotificationView};
pub use post::{CommentView, PostView};
pub use user::{PublicUser, UserSummary};
