/**
 * Application State Management
 *
 * `AppState` is the central state container handed to every handler. It
 * holds only shared, immutable services; all mutable data lives in the
 * database.
 *
 * - `db` - SQLite connection pool
 * - `config` - immutable server configuration
 * - `sessions` - session token issuer/verifier
 * - `passwords` - bcrypt credential store
 * - `media` - image storage backend
 *
 * The `FromRef` implementations let handlers extract a single service with
 * `State<T>` instead of the whole struct.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::sessions::SessionIssuer;
use crate::backend::media::MediaStore;
use crate::backend::server::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,

    pub config: Arc<ServerConfig>,

    pub sessions: SessionIssuer,

    pub passwords: PasswordHasher,

    pub media: Arc<dyn MediaStore>,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SessionIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MediaStore> {
    fn from_ref(state: &AppState) -> Self {
        state.media.clone()
    }
}
