//! Reset Password Use Case
//!
//! Redeems a reset token. Expired tokens are purged before the lookup,
//! so a stale token is indistinguishable from an unknown one.

use std::sync::Arc;

use chrono::Utc;
use kernel::validation::FieldErrors;

use crate::application::config::AuthConfig;
use crate::application::input;
use crate::domain::repository::{AccessTokenRepository, PasswordResetRepository, UserRepository};
use crate::domain::value_object::user_password::UserPassword;
use crate::error::{AuthError, AuthResult, ensure_valid};

/// Reset password input
pub struct ResetPasswordInput {
    pub token: String,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Reset password use case
pub struct ResetPasswordUseCase<U, T, P>
where
    U: UserRepository,
    T: AccessTokenRepository,
    P: PasswordResetRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    reset_repo: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, T, P> ResetPasswordUseCase<U, T, P>
where
    U: UserRepository,
    T: AccessTokenRepository,
    P: PasswordResetRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<T>,
        reset_repo: Arc<P>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            reset_repo,
            config,
        }
    }

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let now = Utc::now();
        let purged = self
            .reset_repo
            .purge_created_before(now - self.config.reset_ttl())
            .await?;
        if purged > 0 {
            tracing::debug!(purged, "Expired password resets purged");
        }

        let mut errors = FieldErrors::new();
        let password = input::new_password(
            &mut errors,
            "password",
            input.password,
            input.password_confirmation.as_deref(),
        );
        let Some(password) = password else {
            return Err(AuthError::Validation(errors));
        };
        ensure_valid(errors)?;

        let reset = self
            .reset_repo
            .find_by_token(&input.token)
            .await?
            .filter(|reset| !reset.is_expired(now, self.config.reset_ttl()))
            .ok_or(AuthError::ResetTokenInvalid)?;

        let Some(mut user) = self.user_repo.find_by_email(&reset.email).await? else {
            return Err(AuthError::AccountMissing);
        };

        let hashed = UserPassword::from_new(&password, self.config.pepper())?;
        user.set_password(hashed, now);
        self.user_repo.update(&user).await?;

        self.reset_repo.delete_for_email(&user.email).await?;
        let revoked = self.token_repo.delete_all_for_user(user.id).await?;

        tracing::info!(user_id = %user.id, revoked_tokens = revoked, "Password reset");

        Ok(())
    }
}
