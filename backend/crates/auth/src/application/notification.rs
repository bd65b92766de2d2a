//! Auth Notifications
//!
//! Renders and sends the verification and password reset emails.

use std::sync::Arc;

use askama::Template;
use platform::mail::{Mailer, OutgoingMail};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, secret_token::SecretToken, user_name::UserName};
use crate::error::{AuthError, AuthResult};

pub const VERIFY_SUBJECT: &str = "Verify Your Email Address";
pub const RESET_SUBJECT: &str = "Reset Your Password";

#[derive(Template)]
#[template(path = "email/verify_email.html")]
struct VerifyEmailHtml<'a> {
    name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "email/verify_email.txt")]
struct VerifyEmailText<'a> {
    name: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "email/reset_password.html")]
struct ResetPasswordHtml<'a> {
    name: &'a str,
    link: &'a str,
    ttl_minutes: i64,
}

#[derive(Template)]
#[template(path = "email/reset_password.txt")]
struct ResetPasswordText<'a> {
    name: &'a str,
    link: &'a str,
    ttl_minutes: i64,
}

/// Sends auth emails through the configured transport
pub struct AuthNotifier<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<M> Clone for AuthNotifier<M>
where
    M: Mailer,
{
    fn clone(&self) -> Self {
        Self {
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

impl<M> AuthNotifier<M>
where
    M: Mailer,
{
    pub fn new(mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self { mailer, config }
    }

    /// `{frontend}/verify-email/{token}`
    pub fn verification_link(&self, token: &SecretToken) -> String {
        format!("{}/verify-email/{}", self.config.frontend_base(), token.as_str())
    }

    /// `{frontend}/reset-password?token=..&email=..`
    pub fn reset_link(&self, token: &SecretToken, email: &Email) -> AuthResult<String> {
        let pairs = [("token", token.as_str()), ("email", email.as_str())];
        let query =
            serde_urlencoded::to_string(pairs).map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(format!("{}/reset-password?{}", self.config.frontend_base(), query))
    }

    pub async fn send_verification(
        &self,
        name: &UserName,
        email: &Email,
        token: &SecretToken,
    ) -> AuthResult<()> {
        let link = self.verification_link(token);
        let name = name.as_str();
        let mail = OutgoingMail {
            to: email.as_str().to_string(),
            subject: VERIFY_SUBJECT.to_string(),
            text_body: VerifyEmailText { name, link: &link }.render()?,
            html_body: VerifyEmailHtml { name, link: &link }.render()?,
        };

        self.mailer.send(mail).await?;
        tracing::debug!(email = %email, "Verification email sent");
        Ok(())
    }

    pub async fn send_reset(
        &self,
        name: &UserName,
        email: &Email,
        token: &SecretToken,
    ) -> AuthResult<()> {
        let link = self.reset_link(token, email)?;
        let name = name.as_str();
        let ttl_minutes = (self.config.reset_ttl().num_seconds() + 59) / 60;
        let mail = OutgoingMail {
            to: email.as_str().to_string(),
            subject: RESET_SUBJECT.to_string(),
            text_body: ResetPasswordText { name, link: &link, ttl_minutes }.render()?,
            html_body: ResetPasswordHtml { name, link: &link, ttl_minutes }.render()?,
        };

        self.mailer.send(mail).await?;
        tracing::debug!(email = %email, "Password reset email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mail::LogMailer;

    fn notifier() -> AuthNotifier<LogMailer> {
        let config = AuthConfig {
            frontend_url: "http://localhost:3000/".to_string(),
            ..AuthConfig::default()
        };
        AuthNotifier::new(Arc::new(LogMailer), Arc::new(config))
    }

    #[test]
    fn test_verification_link() {
        let token = SecretToken::from_raw("abc123");
        assert_eq!(
            notifier().verification_link(&token),
            "http://localhost:3000/verify-email/abc123"
        );
    }

    #[test]
    fn test_reset_link_encodes_email() {
        let token = SecretToken::from_raw("tok");
        let email = Email::new("ada+shop@example.com").unwrap();
        assert_eq!(
            notifier().reset_link(&token, &email).unwrap(),
            "http://localhost:3000/reset-password?token=tok&email=ada%2Bshop%40example.com"
        );
    }

    #[test]
    fn test_templates_render_link() {
        let html = VerifyEmailHtml { name: "Ada", link: "http://x/verify-email/t" }
            .render()
            .unwrap();
        assert!(html.contains("http://x/verify-email/t"));
        assert!(html.contains("Ada"));

        let text = ResetPasswordText { name: "Ada", link: "http://x/r", ttl_minutes: 2 }
            .render()
            .unwrap();
        assert!(text.contains("expires in 2 minute(s)"));
    }
}
