//! Resend Verification Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::validation::FieldErrors;
use platform::mail::Mailer;

use crate::application::input;
use crate::application::notification::AuthNotifier;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Resend verification output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    Sent,
    AlreadyVerified,
}

/// Mints a fresh verification token and mails it
pub struct ResendVerificationUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    notifier: AuthNotifier<M>,
}

impl<U, M> ResendVerificationUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, notifier: AuthNotifier<M>) -> Self {
        Self {
            user_repo,
            notifier,
        }
    }

    pub async fn execute(&self, email: Option<String>) -> AuthResult<ResendOutcome> {
        let mut errors = FieldErrors::new();
        let Some(email) = input::email(&mut errors, email.as_deref()) else {
            return Err(AuthError::Validation(errors));
        };

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            errors.exists("email", false);
            return Err(AuthError::Validation(errors));
        };

        if user.is_verified() {
            return Ok(ResendOutcome::AlreadyVerified);
        }

        let token = user.rotate_verification_token(Utc::now());
        self.user_repo.update(&user).await?;

        self.notifier
            .send_verification(&user.name, &user.email, &token)
            .await?;

        tracing::info!(user_id = %user.id, "Verification email resent");

        Ok(ResendOutcome::Sent)
    }
}
