//! Request extractors
//!
//! Create and update accept multipart (with an `image` file part), JSON
//! objects or urlencoded bodies. All of them end up as a [`FormInput`].
//! Every rejection is a [`CatalogError`], so it renders as a JSON body.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::Json;

use crate::application::form::{FormInput, UploadedImage};
use crate::error::CatalogError;

/// Name of the file part
pub const IMAGE_FIELD: &str = "image";

/// JSON body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CatalogError))]
pub struct JsonBody<T>(pub T);

/// Query string
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CatalogError))]
pub struct QueryParams<T>(pub T);

pub struct FormPayload(pub FormInput);

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let form = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| CatalogError::InvalidRequest(e.body_text()))?;
            read_multipart(multipart).await?
        } else if content_type.starts_with("application/json") {
            let Json(value) = Json::<serde_json::Value>::from_request(req, state).await?;
            from_json(value)?
        } else {
            let bytes = Bytes::from_request(req, state).await.map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    CatalogError::PayloadTooLarge
                } else {
                    CatalogError::InvalidRequest(e.body_text())
                }
            })?;
            from_urlencoded(&bytes)?
        };

        Ok(FormPayload(form))
    }
}

fn multipart_error(e: MultipartError) -> CatalogError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CatalogError::PayloadTooLarge
    } else {
        CatalogError::InvalidRequest(e.body_text())
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormInput, CatalogError> {
    let mut form = FormInput::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            if name != IMAGE_FIELD {
                continue;
            }
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            form.image = Some(UploadedImage {
                file_name: Some(file_name),
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Scalars become their text form; `null` counts as absent
fn from_json(value: serde_json::Value) -> Result<FormInput, CatalogError> {
    use serde_json::Value;

    let Value::Object(map) = value else {
        return Err(CatalogError::InvalidRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let mut form = FormInput::new();
    for (key, value) in map {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            other => other.to_string(),
        };
        form.fields.insert(key, text);
    }
    Ok(form)
}

fn from_urlencoded(bytes: &[u8]) -> Result<FormInput, CatalogError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
        .map_err(|e| CatalogError::InvalidRequest(format!("Malformed form body: {}", e)))?;

    Ok(FormInput {
        fields: pairs.into_iter().collect(),
        image: None,
    })
}
