//! Show Use Case

use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::repository::ResourceRepository;
use crate::domain::resource::Resource;
use crate::error::{CatalogError, CatalogResult};

pub struct ShowUseCase<E, R>
where
    E: Resource,
    R: ResourceRepository<E>,
{
    repo: Arc<R>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> ShowUseCase<E, R>
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

    pub async fn execute(&self, slug: &str) -> CatalogResult<E> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound(E::KIND.title))
    }
}
