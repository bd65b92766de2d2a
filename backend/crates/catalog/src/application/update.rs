//! Update Use Case
//!
//! Full replace of the mutable fields. A new image replaces the old one;
//! the old file is removed only once the row points at the new file.

use std::marker::PhantomData;
use std::sync::Arc;

use platform::storage::FileStorage;

use crate::application::config::CatalogConfig;
use crate::application::files::remove_files;
use crate::application::form::{FormInput, FormMode, ResourceForm, Validated, validate};
use crate::domain::repository::{ReferenceLookup, ResourceRepository};
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateUseCase<E, R, S>
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

impl<E, R, S> UpdateUseCase<E, R, S>
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

    pub async fn execute(&self, slug: &str, form: FormInput) -> CatalogResult<E> {
        let current = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or(CatalogError::NotFound(E::KIND.title))?;

        let Validated { draft, image } = validate::<E, R>(
            self.repo.as_ref(),
            &form,
            FormMode::Update,
            Some(current.id()),
            &self.config,
        )
        .await?;

        let new_path = match (image, E::IMAGE) {
            (Some(image), Some(rules)) => Some(
                self.storage
                    .put(rules.dir, image.format.extension(), &image.bytes)
                    .await?,
            ),
            _ => None,
        };

        let updated = match self.repo.update(&current, &draft, new_path.as_deref()).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(path) = new_path {
                    remove_files(self.storage.as_ref(), &[path], E::KIND.key).await;
                }
                return Err(e);
            }
        };

        if new_path.is_some() {
            if let Some(old) = current.image() {
                remove_files(self.storage.as_ref(), &[old.to_string()], E::KIND.key).await;
            }
        }

        tracing::info!(resource = E::KIND.key, slug = %slug, "Resource updated");

        Ok(updated)
    }
}
