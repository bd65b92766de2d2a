//! Auth client state
//!
//! Owns the bearer token of the shared [`ApiClient`]. Login never stores a
//! token for an unverified account; logout always forgets it locally.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use kernel::validation::FieldErrors;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::model::{MessageBody, User};

const EMAIL_NOT_VERIFIED: &str = "email_not_verified";

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(User),
    /// The API re-sent the verification mail; no token was issued
    EmailNotVerified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Success,
    AlreadyVerified,
    Expired,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    message: Option<String>,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    access_token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct VerifyBody {
    message: String,
    #[serde(default)]
    access_token: Option<String>,
    status: String,
}

#[derive(Debug)]
pub struct AuthStore {
    api: ApiClient,
    user: Option<User>,
    errors: FieldErrors,
    loading: bool,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            user: None,
            errors: FieldErrors::new(),
            loading: false,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.api.token()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.token().is_some()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn reset_errors(&mut self) {
        self.errors = FieldErrors::new();
    }

    fn begin(&mut self) {
        self.reset_errors();
        self.loading = true;
    }

    fn record<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        self.loading = false;
        if let Err(e) = &result {
            if let Some(errors) = e.field_errors() {
                self.errors = errors.clone();
            }
        }
        result
    }

    /// Returns the API message; the issued token is kept
    pub async fn register(&mut self, form: &RegisterForm) -> ClientResult<String> {
        self.begin();
        let result = self.api.post_json::<TokenBody, _>("register", form).await;
        let body = self.record(result)?;

        self.api.set_token(Some(body.access_token));
        tracing::info!(email = %form.email, "Registered");
        Ok(body.message.unwrap_or_default())
    }

    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginOutcome> {
        self.begin();
        let result = self
            .api
            .post_json::<LoginBody, _>("login", &json!({ "email": email, "password": password }))
            .await;

        match self.record(result) {
            Ok(body) => {
                self.api.set_token(Some(body.access_token));
                self.user = Some(body.user.clone());
                Ok(LoginOutcome::Authenticated(body.user))
            }
            Err(ClientError::Api {
                status, message, ..
            }) if status == StatusCode::FORBIDDEN && message == EMAIL_NOT_VERIFIED => {
                self.api.set_token(None);
                self.user = None;
                Ok(LoginOutcome::EmailNotVerified)
            }
            Err(e) => Err(e),
        }
    }

    /// Stale links come back as [`VerificationStatus::Expired`], not an error
    pub async fn verify_email(
        &mut self,
        token: &str,
    ) -> ClientResult<(VerificationStatus, String)> {
        self.begin();
        let result = self
            .api
            .get::<VerifyBody>(&format!("verify-email/{token}"))
            .await;

        match self.record(result) {
            Ok(body) => {
                if let Some(access_token) = body.access_token {
                    self.api.set_token(Some(access_token));
                }
                let status = match body.status.as_str() {
                    "already_verified" => VerificationStatus::AlreadyVerified,
                    _ => VerificationStatus::Success,
                };
                Ok((status, body.message))
            }
            Err(ClientError::Api {
                status, message, ..
            }) if status == StatusCode::GONE => Ok((VerificationStatus::Expired, message)),
            Err(e) => Err(e),
        }
    }

    pub async fn fetch_user(&mut self) -> ClientResult<User> {
        self.loading = true;
        let result = self.api.get::<User>("user").await;
        let user = self.record(result)?;
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Forgets the token and user even when the call fails
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.loading = true;
        let result = self.api.post_empty::<MessageBody>("logout").await;
        self.api.set_token(None);
        self.user = None;
        self.record(result).map(|_| ())
    }

    /// Every other session is revoked; the fresh token replaces the current one
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
        new_password_confirmation: &str,
    ) -> ClientResult<String> {
        self.begin();
        let body = json!({
            "current_password": current_password,
            "new_password": new_password,
            "new_password_confirmation": new_password_confirmation,
        });
        let result = self.api.post_json::<TokenBody, _>("change-password", &body).await;
        let body = self.record(result)?;

        self.api.set_token(Some(body.access_token));
        Ok(body.message.unwrap_or_default())
    }

    pub async fn resend_verification(&mut self, email: &str) -> ClientResult<String> {
        self.begin();
        let result = self
            .api
            .post_json::<MessageBody, _>("resend-verification-email", &json!({ "email": email }))
            .await;
        Ok(self.record(result)?.message)
    }

    pub async fn send_password_reset_link(&mut self, email: &str) -> ClientResult<String> {
        self.begin();
        let result = self
            .api
            .post_json::<MessageBody, _>("send-reset-password-email", &json!({ "email": email }))
            .await;
        Ok(self.record(result)?.message)
    }

    pub async fn reset_password(
        &mut self,
        token: &str,
        password: &str,
        password_confirmation: &str,
    ) -> ClientResult<String> {
        self.begin();
        let body = json!({
            "password": password,
            "password_confirmation": password_confirmation,
        });
        let result = self
            .api
            .post_json::<MessageBody, _>(&format!("reset-password/{token}"), &body)
            .await;
        Ok(self.record(result)?.message)
    }
}
