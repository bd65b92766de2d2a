//! Delete Use Cases
//!
//! Single delete by slug and all-or-nothing bulk delete. Rows go first;
//! images (including those of cascaded products) are removed afterwards.

use std::marker::PhantomData;
use std::sync::Arc;

use kernel::validation::FieldErrors;
use platform::storage::FileStorage;

use crate::application::files::remove_files;
use crate::domain::repository::ResourceRepository;
use crate::domain::resource::Resource;
use crate::error::{CatalogError, CatalogResult, ensure_valid};

pub struct DeleteUseCase<E, R, S>
where
    E: Resource,
    R: ResourceRepository<E>,
    S: FileStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R, S> DeleteUseCase<E, R, S>
where
    E: Resource,
    R: ResourceRepository<E>,
    S: FileStorage,
{
    pub fn new(repo: Arc<R>, storage: Arc<S>) -> Self {
        Self {
            repo,
            storage,
            _entity: PhantomData,
        }
    }

    /// Returns the success message
    pub async fn execute(&self, slug: &str) -> CatalogResult<String> {
        let entity = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound(E::KIND.title))?;

        let images = self
            .repo
            .delete(&entity)
            .await
            .map_err(|e| CatalogError::delete_failed(E::KIND.failure_noun, e))?;

        remove_files(self.storage.as_ref(), &images, E::KIND.key).await;

        tracing::info!(
            resource = E::KIND.key,
            slug = %slug,
            images = images.len(),
            "Resource deleted"
        );

        Ok(E::KIND.deleted_message())
    }
}

pub struct DeleteManyUseCase<E, R, S>
where
    E: Resource,
    R: ResourceRepository<E>,
    S: FileStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R, S> DeleteManyUseCase<E, R, S>
where
    E: Resource,
    R: ResourceRepository<E>,
    S: FileStorage,
{
    pub fn new(repo: Arc<R>, storage: Arc<S>) -> Self {
        Self {
            repo,
            storage,
            _entity: PhantomData,
        }
    }

    pub async fn execute(&self, slugs: Option<Vec<String>>) -> CatalogResult<()> {
        let slugs = slugs.unwrap_or_default();
        if slugs.is_empty() {
            return Err(FieldErrors::single("slugs", "The slugs field is required.").into());
        }

        let mut errors = FieldErrors::new();
        for index in self.repo.missing_slugs(&slugs).await? {
            let field = format!("slugs.{}", index);
            errors.add(field.clone(), format!("The selected {} is invalid.", field));
        }
        ensure_valid(errors)?;

        let images = self
            .repo
            .delete_many(&slugs)
            .await
            .map_err(|e| CatalogError::delete_failed(E::KIND.failure_noun, e))?;

        remove_files(self.storage.as_ref(), &images, E::KIND.key).await;

        tracing::info!(
            resource = E::KIND.key,
            count = slugs.len(),
            images = images.len(),
            "Resources deleted"
        );

        Ok(())
    }
}
