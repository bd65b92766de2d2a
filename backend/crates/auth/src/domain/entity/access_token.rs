//! Access Token Entity
//!
//! A bearer credential issued to a user. Only the SHA-256 digest of the
//! token is persisted; the plain value is returned once at issue time.

use chrono::{DateTime, Utc};
use kernel::id::{AccessTokenId, UserId};

/// Name recorded for tokens issued by the auth endpoints
pub const DEFAULT_TOKEN_NAME: &str = "auth_token";

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub id: AccessTokenId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}
