//! Per-resource client state

use kernel::query::{ListParams, Paginated, PaginationMeta};
use kernel::validation::FieldErrors;
use serde_json::json;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::form::FormData;
use crate::model::{ActiveEntry, ClientResource, DataEnvelope, MessageBody};

/// Cached list, current record and form errors of one resource
#[derive(Debug)]
pub struct ResourceStore<E: ClientResource> {
    api: ApiClient,
    items: Vec<E>,
    current: Option<E>,
    errors: FieldErrors,
    pagination: Option<PaginationMeta>,
    active: Vec<ActiveEntry>,
    loading: bool,
}

impl<E: ClientResource> ResourceStore<E> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Vec::new(),
            current: None,
            errors: FieldErrors::new(),
            pagination: None,
            active: Vec::new(),
            loading: false,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    /// Field errors of the last rejected create/update
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn pagination(&self) -> Option<&PaginationMeta> {
        self.pagination.as_ref()
    }

    pub fn active(&self) -> &[ActiveEntry] {
        &self.active
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn reset_errors(&mut self) {
        self.errors = FieldErrors::new();
    }

    fn record<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        self.loading = false;
        if let Err(e) = &result {
            if let Some(errors) = e.field_errors() {
                self.errors = errors.clone();
            }
            tracing::debug!(resource = E::PATH, error = %e, "Store request failed");
        }
        result
    }

    fn member_path(slug: &str) -> String {
        format!("{}/{}", E::PATH, slug)
    }

    pub async fn fetch_list(&mut self, params: &ListParams) -> ClientResult<()> {
        self.loading = true;
        let result = self
            .api
            .get_with_query::<Paginated<E>, _>(E::PATH, params)
            .await;
        let page = self.record(result)?;

        self.items = page.data;
        self.pagination = Some(page.meta);
        Ok(())
    }

    pub async fn fetch_one(&mut self, slug: &str) -> ClientResult<E> {
        self.loading = true;
        let result = self
            .api
            .get::<DataEnvelope<E>>(&Self::member_path(slug))
            .await;
        let item = self.record(result)?.data;

        self.current = Some(item.clone());
        Ok(item)
    }

    pub async fn create(&mut self, form: FormData) -> ClientResult<E> {
        self.reset_errors();
        self.loading = true;
        let result = self.api.post_form::<DataEnvelope<E>>(E::PATH, form).await;
        let item = self.record(result)?.data;

        self.items.insert(0, item.clone());
        self.current = Some(item.clone());
        Ok(item)
    }

    /// Multipart update through the `POST /{slug}` alias
    pub async fn update(&mut self, slug: &str, form: FormData) -> ClientResult<E> {
        self.reset_errors();
        self.loading = true;
        let result = self
            .api
            .post_form::<DataEnvelope<E>>(&Self::member_path(slug), form)
            .await;
        let item = self.record(result)?.data;

        if let Some(slot) = self.items.iter_mut().find(|i| i.slug() == slug) {
            *slot = item.clone();
        }
        self.current = Some(item.clone());
        Ok(item)
    }

    /// Returns the API's confirmation message
    pub async fn delete(&mut self, slug: &str) -> ClientResult<String> {
        self.loading = true;
        let result = self.api.delete::<MessageBody>(&Self::member_path(slug)).await;
        let body = self.record(result)?;

        self.items.retain(|i| i.slug() != slug);
        if self.current.as_ref().is_some_and(|c| c.slug() == slug) {
            self.current = None;
        }
        Ok(body.message)
    }

    pub async fn delete_multiple(&mut self, slugs: &[String]) -> ClientResult<()> {
        self.loading = true;
        let result = self
            .api
            .delete_json(&format!("{}/multiple", E::PATH), &json!({ "slugs": slugs }))
            .await;
        self.record(result)?;

        self.items.retain(|i| !slugs.iter().any(|s| s == i.slug()));
        Ok(())
    }

    pub async fn fetch_active(&mut self) -> ClientResult<()> {
        self.loading = true;
        let result = self
            .api
            .get::<DataEnvelope<Vec<ActiveEntry>>>(&format!("{}/active", E::PATH))
            .await;
        self.active = self.record(result)?.data;
        Ok(())
    }
}
