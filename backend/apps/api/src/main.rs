//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AuthConfig, AuthMiddlewareState, PgAuthRepository, auth_router, require_bearer};
use axum::{
    Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{self, Method, Request, header},
    middleware::{self, Next},
};
use catalog::{CatalogConfig, PgCatalogRepository, catalog_router};
use platform::config::ServerConfig;
use platform::mail::AnyMailer;
use platform::storage::DiskStorage;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Multipart boundaries and text fields on top of the image itself
const FORM_OVERHEAD_BYTES: usize = 512 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = AuthConfig {
        frontend_url: config.frontend_url.clone(),
        reset_token_ttl: config.reset_token_ttl,
        password_pepper: config.password_pepper.clone(),
    };

    // Startup cleanup: drop expired password reset tokens
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired_resets(auth_config.reset_ttl()).await {
        Ok(deleted) => {
            tracing::info!(resets_deleted = deleted, "Password reset cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Password reset cleanup failed, continuing anyway"
            );
        }
    }

    let mailer = AnyMailer::from_config(&config.mail)?;
    tracing::info!(transport = mailer.transport_name(), "Mailer ready");

    let storage = DiskStorage::new(config.storage_root.clone(), config.app_url.clone()).await?;
    tracing::info!(root = %storage.root().display(), "Image storage ready");

    let catalog_config = if cfg!(debug_assertions) {
        CatalogConfig::development()
    } else {
        CatalogConfig::default()
    };
    let body_limit = catalog_config.max_image_bytes + FORM_OVERHEAD_BYTES;

    // Catalog routes require a bearer token
    let guard = AuthMiddlewareState::new(Arc::new(PgAuthRepository::new(pool.clone())));
    let catalog = catalog_router(
        PgCatalogRepository::new(pool.clone()),
        storage.clone(),
        catalog_config,
    )
    .route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        require_bearer(guard.clone(), req, next)
    }));

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .merge(auth_router(auth_repo, mailer, auth_config))
        .merge(catalog);

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/storage", ServeDir::new(storage.root()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = config.bind_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
