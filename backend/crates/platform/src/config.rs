//! Environment Configuration
//!
//! Typed settings read from the process environment (after `.env` has been
//! loaded by the binary). Lookups go through a closure so tests can supply
//! a map instead of mutating the real environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::crypto::from_base64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// SMTP settings. Without `smtp_host` mail is only logged.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<SecretString>,
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            from_address: "no-reply@localhost".to_string(),
        }
    }
}

/// Process-wide settings of the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// CORS allow-list
    pub frontend_origins: Vec<String>,
    /// Base of links placed in emails
    pub frontend_url: String,
    /// Public base of stored image URLs
    pub app_url: String,
    pub storage_root: PathBuf,
    pub reset_token_ttl: Duration,
    pub password_pepper: Option<Vec<u8>>,
    pub mail: MailConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let password_pepper = get("PASSWORD_PEPPER")
            .map(|v| {
                from_base64(&v).map_err(|e| ConfigError::Invalid {
                    key: "PASSWORD_PEPPER",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let mail_defaults = MailConfig::default();
        let mail = MailConfig {
            smtp_host: get("SMTP_HOST"),
            smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), mail_defaults.smtp_port)?,
            smtp_username: get("SMTP_USERNAME"),
            smtp_password: get("SMTP_PASSWORD").map(SecretString::from),
            from_address: get("MAIL_FROM").unwrap_or(mail_defaults.from_address),
        };

        Ok(Self {
            database_url,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
            bind_addr: parse_or(
                "BIND_ADDR",
                get("BIND_ADDR"),
                SocketAddr::from(([0, 0, 0, 0], 8000)),
            )?,
            frontend_origins: get("FRONTEND_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".to_string())
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            app_url: get("APP_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string())
                .trim_end_matches('/')
                .to_string(),
            storage_root: get("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("storage/app/public")),
            reset_token_ttl: Duration::from_secs(parse_or(
                "RESET_TOKEN_TTL_SECS",
                get("RESET_TOKEN_TTL_SECS"),
                120,
            )?),
            password_pepper,
            mail,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
