//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::query::{ListQuery, Paginated};

use crate::domain::resource::{ActiveItem, ReferenceTarget, Resource};
use crate::domain::value_object::slug::Slug;
use crate::error::CatalogResult;

/// Storage of one catalog entity type
#[trait_variant::make(ResourceRepository: Send)]
pub trait LocalResourceRepository<E: Resource> {
    /// Filtered, sorted page of rows
    async fn list(&self, query: &ListQuery) -> CatalogResult<Paginated<E>>;

    async fn find_by_slug(&self, slug: &str) -> CatalogResult<Option<E>>;

    async fn slug_exists(&self, slug: &Slug) -> CatalogResult<bool>;

    /// Case-insensitive name clash, ignoring the row `except`
    async fn name_taken(&self, name: &str, except: Option<i64>) -> CatalogResult<bool>;

    async fn create(&self, slug: &Slug, draft: &E::Draft, image: Option<&str>) -> CatalogResult<E>;

    /// Full replace of the mutable fields; `image` only when a new one was stored
    async fn update(&self, current: &E, draft: &E::Draft, image: Option<&str>) -> CatalogResult<E>;

    /// Delete the row and everything cascading from it. Returns the image
    /// paths that lost their owner.
    async fn delete(&self, entity: &E) -> CatalogResult<Vec<String>>;

    /// Positions in `slugs` that match no row
    async fn missing_slugs(&self, slugs: &[String]) -> CatalogResult<Vec<usize>>;

    /// All-or-nothing delete by slug; returns orphaned image paths
    async fn delete_many(&self, slugs: &[String]) -> CatalogResult<Vec<String>>;

    /// Active rows ordered by name
    async fn active(&self) -> CatalogResult<Vec<ActiveItem>>;
}

/// Existence checks for foreign keys in forms
#[trait_variant::make(ReferenceLookup: Send)]
pub trait LocalReferenceLookup {
    async fn reference_exists(&self, target: ReferenceTarget, id: i64) -> CatalogResult<bool>;
}
