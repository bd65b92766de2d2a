//! Password Reset Entity
//!
//! One pending reset per email address. A token is usable until
//! `created_at + ttl`; expiry is checked by the caller.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{email::Email, secret_token::SecretToken};

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: Email,
    pub token: SecretToken,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn new(email: Email, now: DateTime<Utc>) -> Self {
        Self {
            email,
            token: SecretToken::link_token(),
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.created_at + ttl <= now
    }
}
