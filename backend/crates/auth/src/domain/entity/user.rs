//! User Entity
//!
//! Account record: identity, credentials and email verification state.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, secret_token::SecretToken, user_name::UserName, user_password::UserPassword,
};

/// Account not yet persisted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub verification_token: SecretToken,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: Email,
    pub password: UserPassword,
    /// Pending email verification token; cleared once verified
    pub verification_token: Option<SecretToken>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Consume the verification token
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.email_verified_at = Some(now);
        self.verification_token = None;
        self.updated_at = now;
    }

    /// Current token, minting one first when none is pending
    pub fn ensure_verification_token(&mut self, now: DateTime<Utc>) -> SecretToken {
        if let Some(token) = &self.verification_token {
            return token.clone();
        }
        self.rotate_verification_token(now)
    }

    /// Replace any pending token with a fresh one
    pub fn rotate_verification_token(&mut self, now: DateTime<Utc>) -> SecretToken {
        let token = SecretToken::link_token();
        self.verification_token = Some(token.clone());
        self.updated_at = now;
        token
    }

    pub fn set_password(&mut self, password: UserPassword, now: DateTime<Utc>) {
        self.password = password;
        self.updated_at = now;
    }
}
