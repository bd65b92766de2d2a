//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldErrors;
use platform::mail::MailError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "The provided credentials are incorrect.";
pub const CURRENT_PASSWORD_MESSAGE: &str = "Current password is incorrect";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request failed field validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Unknown email or wrong password
    #[error("{INVALID_CREDENTIALS_MESSAGE}")]
    InvalidCredentials,

    /// Login attempted before the email was verified
    #[error("email_not_verified")]
    EmailNotVerified,

    /// Verification token unknown or already used
    #[error("Verification link has expired or is invalid.")]
    VerificationLinkInvalid,

    /// Reset token unknown, used or past its TTL
    #[error("Token is invalid or expired")]
    ResetTokenInvalid,

    /// Reset token points at an email with no account
    #[error("User not found")]
    AccountMissing,

    /// Password change with a wrong current password
    #[error("{CURRENT_PASSWORD_MESSAGE}")]
    CurrentPasswordIncorrect,

    /// Missing, unknown or revoked bearer token
    #[error("Unauthenticated.")]
    Unauthenticated,

    /// Body is not a readable JSON object
    #[error("{0}")]
    InvalidRequest(String),

    /// Mail transport failure
    #[error("Mail delivery failed: {0}")]
    Mail(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidCredentials
            | AuthError::CurrentPasswordIncorrect => ErrorKind::UnprocessableEntity,
            AuthError::EmailNotVerified => ErrorKind::Forbidden,
            AuthError::VerificationLinkInvalid => ErrorKind::Gone,
            AuthError::ResetTokenInvalid | AuthError::AccountMissing => ErrorKind::NotFound,
            AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::InvalidRequest(_) => ErrorKind::BadRequest,
            AuthError::Mail(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors.clone()),
            AuthError::InvalidCredentials => AppError::unprocessable(INVALID_CREDENTIALS_MESSAGE)
                .with_errors(FieldErrors::single("email", INVALID_CREDENTIALS_MESSAGE)),
            AuthError::CurrentPasswordIncorrect => {
                AppError::unprocessable(CURRENT_PASSWORD_MESSAGE).with_errors(FieldErrors::single(
                    "current_password",
                    CURRENT_PASSWORD_MESSAGE,
                ))
            }
            AuthError::VerificationLinkInvalid => {
                AppError::new(self.kind(), self.to_string()).with_outcome("expired")
            }
            AuthError::ResetTokenInvalid | AuthError::AccountMissing => {
                AppError::new(self.kind(), self.to_string()).with_outcome("failed")
            }
            AuthError::Mail(_) => AppError::service_unavailable("Unable to send email right now.")
                .with_action("Please try again later"),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "Auth mail delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::ResetTokenInvalid | AuthError::VerificationLinkInvalid => {
                tracing::warn!(error = %self, "Rejected auth link token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        AuthError::Validation(errors)
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidRequest(rejection.body_text())
    }
}

impl From<MailError> for AuthError {
    fn from(err: MailError) -> Self {
        AuthError::Mail(err.to_string())
    }
}

impl From<askama::Error> for AuthError {
    fn from(err: askama::Error) -> Self {
        AuthError::Internal(format!("Template error: {}", err))
    }
}

/// `Ok(())` for an empty map, otherwise [`AuthError::Validation`]
pub fn ensure_valid(errors: FieldErrors) -> AuthResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(errors))
    }
}
