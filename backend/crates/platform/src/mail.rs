//! Outgoing Mail
//!
//! Transactional mail delivery. SMTP via lettre in production; a
//! log-only transport when no SMTP host is configured.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::MailConfig;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Mail transport trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

// ============================================================================
// SMTP
// ============================================================================

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig, host: &str) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(config.smtp_port);

        if let Some(username) = &config.smtp_username {
            let password = config
                .smtp_password
                .as_ref()
                .map(|p| p.expose_secret().to_string())
                .unwrap_or_default();
            builder = builder.credentials(Credentials::new(username.clone(), password));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(mail
                .to
                .parse()
                .map_err(|_| MailError::InvalidAddress(mail.to.clone()))?)
            .subject(mail.subject.as_str())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.text_body),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(mail.html_body),
                    ),
            )?;

        self.transport.send(message).await?;

        tracing::info!(to = %mail.to, subject = %mail.subject, "Email sent");
        Ok(())
    }
}

// ============================================================================
// Log-only transport
// ============================================================================

/// Writes mail to the log instead of delivering it
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.text_body,
            "Email not delivered (no SMTP host configured)"
        );
        Ok(())
    }
}

// ============================================================================
// Runtime selection
// ============================================================================

/// Transport chosen from configuration at startup
#[derive(Clone)]
pub enum AnyMailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl AnyMailer {
    /// SMTP when a host is configured, log-only otherwise
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        match &config.smtp_host {
            Some(host) => Ok(Self::Smtp(SmtpMailer::new(config, host)?)),
            None => Ok(Self::Log(LogMailer)),
        }
    }

    pub fn transport_name(&self) -> &'static str {
        match self {
            Self::Smtp(_) => "smtp",
            Self::Log(_) => "log",
        }
    }
}

impl Mailer for AnyMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        match self {
            Self::Smtp(m) => Mailer::send(m, mail).await,
            Self::Log(m) => Mailer::send(m, mail).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            to: "ada@example.com".into(),
            subject: "Verify Your Email Address".into(),
            text_body: "hello".into(),
            html_body: "<p>hello</p>".into(),
        }
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_mail() {
        assert!(Mailer::send(&LogMailer, mail()).await.is_ok());
    }

    #[test]
    fn test_without_smtp_host_falls_back_to_log() {
        let mailer = AnyMailer::from_config(&MailConfig::default()).unwrap();
        assert_eq!(mailer.transport_name(), "log");
    }
}
