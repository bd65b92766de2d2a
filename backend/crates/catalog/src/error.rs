//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldErrors;
use platform::storage::StorageError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

pub const VALIDATION_MESSAGE: &str = "Validation errors";

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Form or query failed field validation
    #[error("{VALIDATION_MESSAGE}")]
    Validation(FieldErrors),

    /// No row with the requested slug
    #[error("{0} not found.")]
    NotFound(&'static str),

    /// Delete could not complete; the cause is shown to the client
    #[error("Failed to delete the {noun}.")]
    DeleteFailed { noun: &'static str, cause: String },

    /// Body could not be read as a form
    #[error("{0}")]
    InvalidRequest(String),

    /// Upload exceeds the body limit
    #[error("The uploaded file is too large.")]
    PayloadTooLarge,

    /// Image storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::UnprocessableEntity,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::InvalidRequest(_) => ErrorKind::BadRequest,
            CatalogError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            CatalogError::DeleteFailed { .. }
            | CatalogError::Storage(_)
            | CatalogError::Database(_)
            | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Wrap a failure raised while deleting
    pub fn delete_failed(noun: &'static str, cause: CatalogError) -> Self {
        match cause {
            // Already shaped, keep the innermost cause
            CatalogError::DeleteFailed { .. } => cause,
            other => CatalogError::DeleteFailed {
                noun,
                cause: other.to_string(),
            },
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(errors) => {
                AppError::unprocessable(VALIDATION_MESSAGE).with_errors(errors.clone())
            }
            CatalogError::DeleteFailed { cause, .. } => {
                AppError::internal(self.to_string()).with_detail(cause.clone())
            }
            CatalogError::Storage(_) | CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Storage(e) => {
                tracing::error!(error = %e, "Catalog storage error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::DeleteFailed { noun, cause } => {
                tracing::error!(resource = %noun, cause = %cause, "Delete failed");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CatalogError::PayloadTooLarge
        } else {
            CatalogError::InvalidRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

/// `Ok(())` for an empty map, otherwise [`CatalogError::Validation`]
pub fn ensure_valid(errors: FieldErrors) -> CatalogResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Validation(errors))
    }
}
