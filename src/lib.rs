//! SocialHub - Main Library
//!
//! SocialHub is the backend of a small social network: accounts with a
//! follow graph, posts with comments and likes, and notifications raised by
//! follow and like actions. Everything is served as JSON over HTTP and
//! persisted in SQLite.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and validation helpers
//!   - Public user, post and notification representations
//!   - Email and password checks
//!
//! - **`backend`** - Axum server
//!   - Cookie sessions signed with JWT, bcrypt password digests
//!   - Account, content and notification handlers
//!   - Media store abstraction (Cloudinary or in-memory)
//!
//! # Usage
//!
//! ```rust,no_run
//! use socialhub::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `Result`. Domain errors live in
//! `shared::error` and `backend::error`; the latter maps them to HTTP
//! status codes.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
