//! Backend Module
//!
//! The Axum HTTP server: configuration, routing, the auth gate and the
//! account, content and notification services.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Router and route tables
//! ├── middleware/     - Auth gate
//! ├── auth/           - Users, passwords, sessions, auth handlers
//! ├── users/          - Profiles, follow graph, suggestions
//! ├── posts/          - Posts, comments, likes, feeds
//! ├── notifications/  - Follow and like notifications
//! ├── media/          - Image storage backends
//! └── error/          - ApiError and response conversion
//! ```
//!
//! # Request Flow
//!
//! Every protected request passes `middleware::auth_middleware`, which
//! attaches an `AuthenticatedUser`. Handlers read it through the `AuthUser`
//! extractor, run their database operations and return JSON. Errors are
//! converted to JSON responses by `error::conversion`.
//!
//! # State
//!
//! `AppState` holds the SQLite pool and immutable services only. There is
//! no in-process mutable state; consistency comes from the database
//! (single-row edges and transactional toggles).

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Profiles and the follow graph
pub mod users;

/// Posts, comments and likes
pub mod posts;

/// Notifications raised by follow and like
pub mod notifications;

/// Media store abstraction
pub mod media;

pub use error::{ApiError, ContentError};
pub use server::create_app;
