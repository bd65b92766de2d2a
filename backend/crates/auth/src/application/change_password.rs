//! Change Password Use Case
//!
//! Replaces the password of the signed-in user, revokes every bearer
//! token and issues a new one.

use std::sync::Arc;

use chrono::Utc;
use kernel::validation::FieldErrors;

use crate::application::config::AuthConfig;
use crate::application::input;
use crate::application::token::issue_access_token;
use crate::domain::entity::user::User;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::{secret_token::SecretToken, user_password::UserPassword};
use crate::error::{AuthError, AuthResult, ensure_valid};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub new_password_confirmation: Option<String>,
}

/// Change password use case
pub struct ChangePasswordUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> ChangePasswordUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        mut user: User,
        input: ChangePasswordInput,
    ) -> AuthResult<SecretToken> {
        let mut errors = FieldErrors::new();
        let current = input::present(&mut errors, "current_password", input.current_password);
        let new_password = input::new_password(
            &mut errors,
            "new_password",
            input.new_password,
            input.new_password_confirmation.as_deref(),
        );

        let (Some(current), Some(new_password)) = (current, new_password) else {
            return Err(AuthError::Validation(errors));
        };
        ensure_valid(errors)?;

        if !user.password.verify(&current, self.config.pepper()) {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        let hashed = UserPassword::from_new(&new_password, self.config.pepper())?;
        user.set_password(hashed, Utc::now());
        self.user_repo.update(&user).await?;

        let revoked = self.token_repo.delete_all_for_user(user.id).await?;
        let access_token = issue_access_token(self.token_repo.as_ref(), user.id).await?;

        tracing::info!(user_id = %user.id, revoked_tokens = revoked, "Password changed");

        Ok(access_token)
    }
}
