//! List Use Cases
//!
//! Paginated listing and the unpaginated `active` list.

use std::marker::PhantomData;
use std::sync::Arc;

use kernel::query::{ListParams, ListQuery, Paginated};

use crate::domain::repository::ResourceRepository;
use crate::domain::resource::{ActiveItem, Resource};
use crate::error::CatalogResult;

pub struct ListUseCase<E, R>
where
    E: Resource,
    R: ResourceRepository<E>,
{
    repo: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> ListUseCase<E, R>
where
    E: Resource,
    R: ResourceRepository<E>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    pub async fn execute(&self, params: ListParams) -> CatalogResult<Paginated<E>> {
        let query = ListQuery::from(params);
        let page = self.repo.list(&query).await?;

        tracing::debug!(
            resource = E::KIND.key,
            total = page.meta.total,
            page = page.meta.current_page,
            "Listed resources"
        );

        Ok(page)
    }
}

pub struct ActiveUseCase<E, R>
where
    E: Resource,
    R: ResourceRepository<E>,
{
    repo: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> ActiveUseCase<E, R>
where
    E: Resource,
    R: ResourceRepository<E>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    /// Active rows ordered by name
    pub async fn execute(&self) -> CatalogResult<Vec<ActiveItem>> {
        self.repo.active().await
    }
}
