//! Catalog Router
//!
//! Routes are mounted without authentication; the binary layers the
//! bearer guard over them.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get};
use platform::storage::DiskStorage;

use crate::application::config::CatalogConfig;
use crate::domain::entity::{Brand, Category, Color, Product, SubCategory};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{
    self, CatalogAppState, CatalogRepositories, CatalogResource, CatalogStorage, ResourceStore,
};

/// Create the Catalog router with PostgreSQL repository and disk storage
pub fn catalog_router(
    repo: PgCatalogRepository,
    storage: DiskStorage,
    config: CatalogConfig,
) -> Router {
    catalog_router_generic(repo, storage, config)
}

/// Create a generic Catalog router for any repository and storage backend
pub fn catalog_router_generic<R, S>(repo: R, storage: S, config: CatalogConfig) -> Router
where
    R: CatalogRepositories,
    S: CatalogStorage,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        storage: Arc::new(storage),
        config: Arc::new(config),
    };

    Router::new()
        .nest("/category", resource_routes::<Category, R, S>())
        .nest("/sub_category", resource_routes::<SubCategory, R, S>())
        .nest("/brands", resource_routes::<Brand, R, S>())
        .nest("/colors", resource_routes::<Color, R, S>())
        .nest("/products", resource_routes::<Product, R, S>())
        .with_state(state)
}

fn resource_routes<E, R, S>() -> Router<CatalogAppState<R, S>>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    Router::new()
        .route(
            "/",
            get(handlers::index::<E, R, S>).post(handlers::store::<E, R, S>),
        )
        .route("/active", get(handlers::active::<E, R, S>))
        .route("/multiple", delete(handlers::destroy_many::<E, R, S>))
        .route(
            "/{slug}",
            get(handlers::show::<E, R, S>)
                .put(handlers::update::<E, R, S>)
                .post(handlers::update::<E, R, S>)
                .delete(handlers::destroy::<E, R, S>),
        )
}
