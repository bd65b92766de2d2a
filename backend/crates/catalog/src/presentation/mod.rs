//! Presentation Layer
//!
//! HTTP handlers, payloads, form extraction and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod humanize;
pub mod payload;
pub mod router;

pub use handlers::{CatalogAppState, CatalogRepositories, CatalogStorage};
pub use router::{catalog_router, catalog_router_generic};
