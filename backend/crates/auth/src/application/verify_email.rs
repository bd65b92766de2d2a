//! Verify Email Use Case
//!
//! Consumes the token from the verification link and signs the user in.

use std::sync::Arc;

use chrono::Utc;

use crate::application::token::issue_access_token;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::secret_token::SecretToken;
use crate::error::{AuthError, AuthResult};

/// Verify email output
pub enum VerifyEmailOutput {
    Verified { access_token: SecretToken },
    AlreadyVerified,
}

/// Verify email use case
pub struct VerifyEmailUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
}

impl<U, T> VerifyEmailUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<VerifyEmailOutput> {
        if token.is_empty() {
            return Err(AuthError::VerificationLinkInvalid);
        }

        let Some(mut user) = self.user_repo.find_by_verification_token(token).await? else {
            return Err(AuthError::VerificationLinkInvalid);
        };

        if user.is_verified() {
            return Ok(VerifyEmailOutput::AlreadyVerified);
        }

        user.mark_verified(Utc::now());
        self.user_repo.update(&user).await?;

        let access_token = issue_access_token(self.token_repo.as_ref(), user.id).await?;

        tracing::info!(user_id = %user.id, "Email verified");

        Ok(VerifyEmailOutput::Verified { access_token })
    }
}
