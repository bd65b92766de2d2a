//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so that a missing field is reported as a
//! field error rather than a deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::secret_token::SecretToken;

pub const TOKEN_TYPE: &str = "Bearer";

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of resend-verification and send-reset-link
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmailRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub new_password_confirmation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            email_verified_at: user.email_verified_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{message, access_token, token_type}`
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub message: &'static str,
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn new(message: &'static str, token: SecretToken) -> Self {
        Self {
            message,
            access_token: token.into_string(),
            token_type: TOKEN_TYPE,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyEmailResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<&'static str>,
    pub status: &'static str,
}

/// `{message}` with an optional outcome tag
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            message,
            status: None,
        }
    }

    pub fn with_status(message: &'static str, status: &'static str) -> Self {
        Self {
            message,
            status: Some(status),
        }
    }
}
