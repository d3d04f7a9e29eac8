//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion into JSON
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError and ContentError
//! └── conversion.rs - IntoResponse implementations
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{ApiError, ContentError};
