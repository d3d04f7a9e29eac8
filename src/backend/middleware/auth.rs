/**
 * Authentication Middleware
 *
 * The auth gate in front of every protected route. It reads the session
 * token from the `jwt` cookie, verifies it, loads the referenced user and
 * attaches an [`AuthenticatedUser`] to the request extensions. Handlers pick
 * it up with the [`AuthUser`] extractor.
 *
 * Every failure (no cookie, bad or expired token, deleted user) is a 401.
 * Database errors while loading the user are a 500.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::backend::auth::sessions::SESSION_COOKIE;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// The user a request was authenticated as
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookies
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthenticated("You must be logged in"))?;

    let user_id = state.sessions.verify(&token).map_err(|e| {
        tracing::debug!("Session verification failed: {e}");
        ApiError::unauthenticated("Invalid Token")
    })?;

    let user = get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Extractor for the user attached by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::error!("AuthenticatedUser missing; route is not behind auth_middleware");
                ApiError::internal("authenticated user missing from request")
            })
    }
}
