//! HTTP transport for the admin API

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};
use crate::form::FormData;

const TIMEOUT: Duration = Duration::from_secs(30);

/// API client; clones share one bearer token
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let http = Client::builder().timeout(TIMEOUT).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        // Url::join drops the last segment unless the base ends with '/'
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let mut builder = self
            .http
            .request(method, self.url(path)?)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let builder = self.request(Method::GET, path)?;
        self.send(builder).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path)?.query(query);
        self.send(builder).await
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder).await
    }

    /// POST without a body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let builder = self.request(Method::POST, path)?;
        self.send(builder).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
    ) -> ClientResult<T> {
        let builder = self.request(Method::POST, path)?.multipart(form.into_multipart()?);
        self.send(builder).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder).await
    }

    /// DELETE with a JSON body, expecting an empty response
    pub async fn delete_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, path)?.json(body);
        self.checked(builder).await.map(|_| ())
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.checked(builder).await?;
        Ok(response.json().await?)
    }

    /// Send and turn non-success statuses into [`ClientError::Api`]
    async fn checked(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.bytes().await?;
        let err = ClientError::from_body(status, &body);

        if status.is_server_error() {
            tracing::warn!(
                path = %url,
                status = status.as_u16(),
                error = %err,
                "API request failed"
            );
        } else {
            tracing::debug!(
                path = %url,
                status = status.as_u16(),
                error = %err,
                "API request rejected"
            );
        }
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_keeps_prefix() {
        let client = ApiClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.url("/category/abc").unwrap().as_str(),
            "http://localhost:8000/api/category/abc"
        );

        let client = ApiClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(
            client.url("products").unwrap().as_str(),
            "http://localhost:8000/api/products"
        );
    }

    #[test]
    fn test_clones_share_token() {
        let client = ApiClient::new("http://localhost:8000/api").unwrap();
        let other = client.clone();

        client.set_token(Some("abc".into()));
        assert_eq!(other.token().as_deref(), Some("abc"));

        other.set_token(None);
        assert!(client.token().is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
