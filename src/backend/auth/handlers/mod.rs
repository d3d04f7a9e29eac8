//! Authentication HTTP handlers
//!
//! - `POST /api/auth/signup` - [`signup`]
//! - `POST /api/auth/login` - [`login`]
//! - `POST /api/auth/logout` - [`logout`]
//! - `GET /api/auth/me` - [`get_me`] (protected)

/// Request/response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

pub use types::{AuthResponse, LoginRequest, MessageResponse, SignupRequest};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use signup::signup;
