//! Routes Module
//!
//! - `router` - assembles the application router and its layers
//! - `api_routes` - the public and protected API route tables

/// Main router creation
pub mod router;

/// API endpoint tables
pub mod api_routes;

pub use router::create_router;
