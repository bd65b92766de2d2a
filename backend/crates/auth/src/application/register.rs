//! Register Use Case
//!
//! Creates an unverified account, issues its first bearer token and
//! sends the verification email.

use std::sync::Arc;

use kernel::validation::FieldErrors;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::input;
use crate::application::notification::AuthNotifier;
use crate::application::token::issue_access_token;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::{secret_token::SecretToken, user_password::UserPassword};
use crate::error::{AuthError, AuthResult, ensure_valid};

/// Register input
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub access_token: SecretToken,
}

/// Register use case
pub struct RegisterUseCase<U, T, M>
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

impl<U, T, M> RegisterUseCase<U, T, M>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let mut errors = FieldErrors::new();

        let name = input::name(&mut errors, input.name.as_deref());
        let email = input::email(&mut errors, input.email.as_deref());
        if let Some(email) = &email {
            errors.unique("email", self.user_repo.exists_by_email(email).await?);
        }
        let password = input::new_password(
            &mut errors,
            "password",
            input.password,
            input.password_confirmation.as_deref(),
        );

        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return Err(AuthError::Validation(errors));
        };
        ensure_valid(errors)?;

        let new_user = NewUser {
            name,
            email,
            password: UserPassword::from_new(&password, self.config.pepper())?,
            verification_token: SecretToken::link_token(),
        };

        let user = self.user_repo.create(&new_user).await?;

        // Mail failures leave the account in place
        if let Err(e) = self
            .notifier
            .send_verification(&user.name, &user.email, &new_user.verification_token)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "Verification email not sent");
        }

        let access_token = issue_access_token(self.token_repo.as_ref(), user.id).await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(RegisterOutput { user, access_token })
    }
}
