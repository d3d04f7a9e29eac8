/**
 * Router Configuration
 *
 * Combines the public and protected API routes into one router.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - request spans with method, path and status
 * 2. `CorsLayer` - the configured origin only, credentials allowed
 * 3. `CookieManagerLayer` - cookie jar for the session cookie
 * 4. `auth_middleware` - protected routes only (route layer)
 *
 * Unknown paths get a JSON 404.
 */

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(&config.cors_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("Invalid CORS origin {:?}: {e}; cross-origin requests disabled", config.cors_origin);
            layer
        }
    }
}

pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_protected_routes(Router::new())
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let router = configure_public_routes(Router::new())
        .route("/health", get(health))
        .merge(protected)
        .fallback(not_found);

    router
        .layer(CookieManagerLayer::new())
        .layer(cors_layer(&app_state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
