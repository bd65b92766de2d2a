//! HTTP Handlers
//!
//! One generic set of handlers serves all five resources.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kernel::query::{ListParams, Paginated};
use platform::storage::FileStorage;

use crate::application::{
    ActiveUseCase, CatalogConfig, CreateUseCase, DeleteManyUseCase, DeleteUseCase, ListUseCase,
    ResourceForm, ShowUseCase, UpdateUseCase,
};
use crate::domain::entity::{Brand, Category, Color, Product, SubCategory};
use crate::domain::repository::{ReferenceLookup, ResourceRepository};
use crate::domain::resource::ActiveItem;
use crate::error::CatalogResult;
use crate::presentation::dto::{DataResponse, DeleteManyRequest, MessageResponse};
use crate::presentation::extract::{FormPayload, JsonBody, QueryParams};
use crate::presentation::payload::{Present, PresentContext};

/// Entity served by the generic handlers
pub trait CatalogResource: ResourceForm + Present {}

impl<T: ResourceForm + Present> CatalogResource for T {}

/// Repository of one resource, usable from handlers
pub trait ResourceStore<E: CatalogResource>:
    ResourceRepository<E> + ReferenceLookup + Send + Sync + 'static
{
}

impl<E, T> ResourceStore<E> for T
where
    E: CatalogResource,
    T: ResourceRepository<E> + ReferenceLookup + Send + Sync + 'static,
{
}

/// Every repository the catalog handlers need, implemented by one store
pub trait CatalogRepositories:
    ResourceStore<Category>
    + ResourceStore<SubCategory>
    + ResourceStore<Brand>
    + ResourceStore<Color>
    + ResourceStore<Product>
{
}

impl<T> CatalogRepositories for T where
    T: ResourceStore<Category>
        + ResourceStore<SubCategory>
        + ResourceStore<Brand>
        + ResourceStore<Color>
        + ResourceStore<Product>
{
}

/// Storage backend usable from handlers
pub trait CatalogStorage: FileStorage + Send + Sync + 'static {}

impl<T: FileStorage + Send + Sync + 'static> CatalogStorage for T {}

/// Shared state for catalog handlers
pub struct CatalogAppState<R, S> {
    pub repo: Arc<R>,
    pub storage: Arc<S>,
    pub config: Arc<CatalogConfig>,
}

impl<R, S> Clone for CatalogAppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            storage: self.storage.clone(),
            config: self.config.clone(),
        }
    }
}

/// GET /api/{resource}
pub async fn index<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
    QueryParams(params): QueryParams<ListParams>,
) -> CatalogResult<Json<Paginated<E::Payload>>>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    let page = ListUseCase::<E, R>::new(state.repo.clone())
        .execute(params)
        .await?;

    let ctx = PresentContext::new(state.storage.as_ref());
    Ok(Json(page.map(|entity| entity.present(&ctx))))
}

/// POST /api/{resource}
pub async fn store<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
    FormPayload(form): FormPayload,
) -> CatalogResult<impl IntoResponse>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    let use_case = CreateUseCase::<E, R, S>::new(
        state.repo.clone(),
        state.storage.clone(),
        state.config.clone(),
    );
    let entity = use_case.execute(form).await?;

    let ctx = PresentContext::new(state.storage.as_ref());
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(entity.present(&ctx))),
    ))
}

/// GET /api/{resource}/{slug}
pub async fn show<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Path(slug): Path<String>,
) -> CatalogResult<Json<DataResponse<E::Payload>>>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    let entity = ShowUseCase::<E, R>::new(state.repo.clone())
        .execute(&slug)
        .await?;

    let ctx = PresentContext::new(state.storage.as_ref());
    Ok(Json(DataResponse::new(entity.present(&ctx))))
}

/// PUT|POST /api/{resource}/{slug}
pub async fn update<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Path(slug): Path<String>,
    FormPayload(form): FormPayload,
) -> CatalogResult<Json<DataResponse<E::Payload>>>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    let use_case = UpdateUseCase::<E, R, S>::new(
        state.repo.clone(),
        state.storage.clone(),
        state.config.clone(),
    );
    let entity = use_case.execute(&slug, form).await?;

    let ctx = PresentContext::new(state.storage.as_ref());
    Ok(Json(DataResponse::new(entity.present(&ctx))))
}

/// DELETE /api/{resource}/{slug}
pub async fn destroy<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
    Path(slug): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    let message = DeleteUseCase::<E, R, S>::new(state.repo.clone(), state.storage.clone())
        .execute(&slug)
        .await?;

    Ok(Json(MessageResponse { message }))
}

/// DELETE /api/{resource}/multiple
pub async fn destroy_many<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
    JsonBody(req): JsonBody<DeleteManyRequest>,
) -> CatalogResult<StatusCode>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    DeleteManyUseCase::<E, R, S>::new(state.repo.clone(), state.storage.clone())
        .execute(req.into_slugs())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/{resource}/active
pub async fn active<E, R, S>(
    State(state): State<CatalogAppState<R, S>>,
) -> CatalogResult<Json<DataResponse<Vec<ActiveItem>>>>
where
    E: CatalogResource,
    R: ResourceStore<E>,
    S: CatalogStorage,
{
    let items = ActiveUseCase::<E, R>::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(DataResponse::new(items)))
}
