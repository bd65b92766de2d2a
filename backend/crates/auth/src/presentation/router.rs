//! Auth Router

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::{
    Router,
    routing::{get, post},
};
use platform::mail::{AnyMailer, Mailer};

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthRepositories};
use crate::presentation::middleware::{AuthMiddlewareState, require_bearer};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, mailer: AnyMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository and mail transport
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: AuthRepositories,
    M: Mailer + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let state = AuthAppState {
        repo: repo.clone(),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };
    let guard = AuthMiddlewareState::new(repo);

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/change-password", post(handlers::change_password::<R, M>))
        .route("/user", get(handlers::current_user))
        .route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            require_bearer(guard.clone(), req, next)
        }));

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/verify-email/{token}", get(handlers::verify_email::<R, M>))
        .route(
            "/resend-verification-email",
            post(handlers::resend_verification::<R, M>),
        )
        .route(
            "/send-reset-password-email",
            post(handlers::send_reset_link::<R, M>),
        )
        .route("/reset-password/{token}", post(handlers::reset_password::<R, M>))
        .merge(protected)
        .with_state(state)
}
