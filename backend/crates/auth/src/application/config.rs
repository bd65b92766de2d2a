//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the frontend that hosts the verify/reset pages
    pub frontend_url: String,
    /// How long a password reset token stays valid
    pub reset_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            reset_token_ttl: Duration::from_secs(120), // 2 minutes
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Config for local development
    pub fn development() -> Self {
        Self::default()
    }

    /// Reset TTL as a chrono duration for timestamp arithmetic
    pub fn reset_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.reset_token_ttl).unwrap_or(chrono::Duration::seconds(120))
    }

    /// Frontend base without a trailing slash
    pub fn frontend_base(&self) -> &str {
        self.frontend_url.trim_end_matches('/')
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
