//! Send Password Reset Link Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::validation::FieldErrors;
use platform::mail::Mailer;

use crate::application::input;
use crate::application::notification::AuthNotifier;
use crate::domain::entity::password_reset::PasswordReset;
use crate::domain::repository::{PasswordResetRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Stores a reset token for the email (replacing any pending one) and
/// mails the reset link
pub struct SendResetLinkUseCase<U, P, M>
where
    U: UserRepository,
    P: PasswordResetRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    reset_repo: Arc<P>,
    notifier: AuthNotifier<M>,
}

impl<U, P, M> SendResetLinkUseCase<U, P, M>
where
    U: UserRepository,
    P: PasswordResetRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, reset_repo: Arc<P>, notifier: AuthNotifier<M>) -> Self {
        Self {
            user_repo,
            reset_repo,
            notifier,
        }
    }

    pub async fn execute(&self, email: Option<String>) -> AuthResult<()> {
        let mut errors = FieldErrors::new();
        let Some(email) = input::email(&mut errors, email.as_deref()) else {
            return Err(AuthError::Validation(errors));
        };

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            errors.exists("email", false);
            return Err(AuthError::Validation(errors));
        };

        let reset = PasswordReset::new(user.email.clone(), Utc::now());
        self.reset_repo.upsert(&reset).await?;

        self.notifier
            .send_reset(&user.name, &user.email, &reset.token)
            .await?;

        tracing::info!(user_id = %user.id, "Password reset link sent");

        Ok(())
    }
}
