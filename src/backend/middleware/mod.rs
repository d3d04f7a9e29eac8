//! Middleware Module
//!
//! - **`auth`** - Session cookie authentication for protected routes
//!
//! ```rust,no_run
//! use axum::middleware::from_fn_with_state;
//! use socialhub::backend::middleware::auth_middleware;
//!
//! // let protected = protected.route_layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
