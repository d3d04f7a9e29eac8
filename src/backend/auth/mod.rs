//! Authentication Module
//!
//! Account creation, login and sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── passwords.rs    - bcrypt credential store
//! ├── sessions.rs     - JWT session tokens and the session cookie
//! └── handlers/       - signup, login, logout, me
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: fields validated → user created → session cookie set
//! 2. **Login**: credentials verified → session cookie set
//! 3. **Protected requests**: cookie verified by the auth gate
//!    (`backend::middleware::auth`)
//! 4. **Logout**: session cookie expired
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt and never returned or logged
//! - Session tokens expire after 15 days and live in an HTTP-only,
//!   `SameSite=Strict` cookie
//! - Bad credentials return the same 401 whether or not the user exists

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, signup};
pub use passwords::PasswordHasher;
pub use sessions::SessionIssuer;
