//! Bearer-token authentication middleware.
//!
//! The authentication gate runs before any handler body: the token is
//! decoded and verified, and its subject resolved to a full user record
//! (minus the password hash). A bad token and a vanished user are both
//! surfaced as 401.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::user::{PublicUser, UserRepository};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extractor for the authenticated caller.
///
/// Handlers taking this extractor require a valid bearer token; they
/// receive the resolved user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Bearer token from the Authorization header
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("access token required"))?;

        // App state from extensions (set by middleware)
        let state = parts
            .extensions
            .get::<Arc<AppState>>()
            .ok_or_else(|| ApiError::internal("application state not configured"))?;

        let claims = state.keys.verify(token).map_err(ApiError::from)?;

        // The token may outlive its user
        let user = UserRepository::new(state.db.pool())
            .find_public_by_id(claims.sub)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("user no longer exists"))?;

        Ok(CurrentUser(user))
    }
}

/// Middleware injecting the shared application state into request
/// extensions so extractors can reach it.
pub async fn inject_state(
    state: Arc<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(state);
    next.run(request).await
}
