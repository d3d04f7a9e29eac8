//! Server Module
//!
//! Configuration, application state and initialization.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── config.rs  - ServerConfig, loaded from the environment
//! ├── state.rs   - AppState and FromRef implementations
//! └── init.rs    - Database setup and app assembly
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
