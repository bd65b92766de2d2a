//! Client errors

use kernel::validation::FieldErrors;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response decoded from the API's JSON error body
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        errors: FieldErrors,
        /// `status` tag of the body, e.g. `expired`
        outcome: Option<String>,
        /// Exposed cause of a server failure
        detail: Option<String>,
    },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error body shape shared by every API failure
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: FieldErrors,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ClientError {
    /// Build an API error from a status and raw body; unparseable bodies keep the status reason
    pub(crate) fn from_body(status: StatusCode, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed.message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

        ClientError::Api {
            status,
            message,
            errors: parsed.errors,
            outcome: parsed.status,
            detail: parsed.error,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Field errors of a 422 response
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Api { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&str> {
        match self {
            ClientError::Api { outcome, .. } => outcome.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body() {
        let body =
            br#"{"message":"Validation errors","errors":{"name":["The name field is required."]}}"#;
        let err = ClientError::from_body(StatusCode::UNPROCESSABLE_ENTITY, body);

        assert_eq!(err.to_string(), "Validation errors");
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("name").unwrap(), ["The name field is required.".to_string()]);
    }

    #[test]
    fn test_outcome_and_detail() {
        let body = br#"{"message":"Failed to delete the Brand.","error":"Database error: boom"}"#;
        let ClientError::Api { detail, .. } =
            ClientError::from_body(StatusCode::INTERNAL_SERVER_ERROR, body)
        else {
            panic!("expected api error");
        };
        assert_eq!(detail.as_deref(), Some("Database error: boom"));

        let body = br#"{"message":"Token is invalid or expired","status":"failed"}"#;
        let err = ClientError::from_body(StatusCode::NOT_FOUND, body);
        assert_eq!(err.outcome(), Some("failed"));
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_non_json_body_uses_reason() {
        let err = ClientError::from_body(StatusCode::BAD_GATEWAY, b"<html>");
        assert_eq!(err.to_string(), "Bad Gateway");
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert!(!err.is_unauthenticated());
    }
}
