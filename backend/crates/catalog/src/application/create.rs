//! Create Use Case
//!
//! Validates the form, assigns a fresh slug, stores the image and inserts
//! the row. A failed insert removes the stored image again.

use std::marker::PhantomData;
use std::sync::Arc;

use platform::storage::FileStorage;

use crate::application::config::CatalogConfig;
use crate::application::files::remove_files;
use crate::application::form::{FormInput, FormMode, ResourceForm, Validated, validate};
use crate::application::slug::unique_slug;
use crate::domain::repository::{ReferenceLookup, ResourceRepository};
use crate::domain::value_object::slug::Slug;
use crate::error::CatalogResult;

pub struct CreateUseCase<E, R, S>
where
    E: ResourceForm,
    R: ResourceRepository<E> + ReferenceLookup,
    S: FileStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    config: Arc<CatalogConfig>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R, S> CreateUseCase<E, R, S>
where
    E: ResourceForm,
    R: ResourceRepository<E> + ReferenceLookup,
    S: FileStorage,
{
    pub fn new(repo: Arc<R>, storage: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            repo,
            storage,
            config,
            _entity: PhantomData,
        }
    }

    pub async fn execute(&self, form: FormInput) -> CatalogResult<E> {
        let Validated { draft, image } = validate::<E, R>(
            self.repo.as_ref(),
            &form,
            FormMode::Create,
            None,
            &self.config,
        )
        .await?;

        let repo = self.repo.as_ref();
        let slug = unique_slug(
            Slug::generate,
            |candidate: Slug| async move { repo.slug_exists(&candidate).await },
            self.config.slug_attempts,
        )
        .await?;

        let path = match (image, E::IMAGE) {
            (Some(image), Some(rules)) => Some(
                self.storage
                    .put(rules.dir, image.format.extension(), &image.bytes)
                    .await?,
            ),
            _ => None,
        };

        let entity = match self.repo.create(&slug, &draft, path.as_deref()).await {
            Ok(entity) => entity,
            Err(e) => {
                if let Some(path) = path {
                    remove_files(self.storage.as_ref(), &[path], E::KIND.key).await;
                }
                return Err(e);
            }
        };

        tracing::info!(resource = E::KIND.key, slug = %slug, "Resource created");

        Ok(entity)
    }
}
