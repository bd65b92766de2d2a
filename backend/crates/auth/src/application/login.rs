//! Login Use Case
//!
//! Checks credentials and issues a bearer token to verified users.
//! Unverified users get the verification email again instead.

use std::sync::Arc;

use chrono::Utc;
use kernel::validation::FieldErrors;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::input;
use crate::application::notification::AuthNotifier;
use crate::application::token::issue_access_token;
use crate::domain::entity::user::User;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::secret_token::SecretToken;
use crate::error::{AuthError, AuthResult, ensure_valid};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    pub access_token: SecretToken,
}

/// Login use case
pub struct LoginUseCase<U, T, M>
where
    U: UserRepository,
    T: AccessTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    notifier: AuthNotifier<M>,
    config: Arc<AuthConfig>,
}

impl<U, T, M> LoginUseCase<U, T, M>
where
    U: UserRepository,
    T: AccessTokenRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<T>,
        notifier: AuthNotifier<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let mut errors = FieldErrors::new();
        let email = input::email(&mut errors, input.email.as_deref());
        let password = input::present(&mut errors, "password", input.password);

        let (Some(email), Some(password)) = (email, password) else {
            return Err(AuthError::Validation(errors));
        };
        ensure_valid(errors)?;

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_verified() {
            let had_token = user.verification_token.is_some();
            let token = user.ensure_verification_token(Utc::now());
            if !had_token {
                self.user_repo.update(&user).await?;
            }

            if let Err(e) = self
                .notifier
                .send_verification(&user.name, &user.email, &token)
                .await
            {
                tracing::warn!(user_id = %user.id, error = %e, "Verification email not sent");
            }

            tracing::info!(user_id = %user.id, "Login refused, email not verified");
            return Err(AuthError::EmailNotVerified);
        }

        let access_token = issue_access_token(self.token_repo.as_ref(), user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput { user, access_token })
    }
}
