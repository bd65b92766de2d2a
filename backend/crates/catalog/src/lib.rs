//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, resource capability, repository traits
//! - `application/` - Form validation and the shared CRUD use cases
//! - `infra/` - PostgreSQL repository and list query engine
//! - `presentation/` - Payloads, form extraction, HTTP handlers, router
//!
//! ## Resources
//! Categories, sub categories, brands, colors and products share one set of
//! list/show/create/update/delete use cases. Each entity only describes its
//! form rules, table and payload.
//!
//! ## Storage
//! Uploaded images live in [`platform::storage`]; a replaced image or one
//! whose row (or parent row) is deleted is removed from storage.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
