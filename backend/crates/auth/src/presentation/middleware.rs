//! Auth Middleware
//!
//! Bearer token guard for protected routes. On success the resolved
//! [`Authenticated`] caller is stored in the request extensions.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::bearer::extract_bearer;

use crate::application::authenticate;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + AccessTokenRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> AuthMiddlewareState<R>
where
    R: UserRepository + AccessTokenRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> Clone for AuthMiddlewareState<R>
where
    R: UserRepository + AccessTokenRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + AccessTokenRepository + Send + Sync + 'static,
{
    let Some(token) = extract_bearer(req.headers()) else {
        return Err(AuthError::Unauthenticated.into_response());
    };

    let caller = authenticate(state.repo.as_ref(), state.repo.as_ref(), &token)
        .await
        .map_err(IntoResponse::into_response)?;

    tracing::debug!(user_id = %caller.user.id, "Bearer token accepted");

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
