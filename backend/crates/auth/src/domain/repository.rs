//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{AccessTokenId, UserId};

use crate::domain::entity::{
    access_token::AccessToken,
    password_reset::PasswordReset,
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new account and return it with its assigned id
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_by_verification_token(&self, token: &str) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Persist name, password and verification state
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Bearer token repository trait
#[trait_variant::make(AccessTokenRepository: Send)]
pub trait LocalAccessTokenRepository {
    /// Store the digest of a freshly issued token
    async fn create(
        &self,
        user_id: UserId,
        name: &str,
        digest: &[u8; 32],
    ) -> AuthResult<AccessTokenId>;

    async fn find_by_digest(&self, digest: &[u8; 32]) -> AuthResult<Option<AccessToken>>;

    /// Record usage of a token
    async fn touch(&self, token_id: AccessTokenId, at: DateTime<Utc>) -> AuthResult<()>;

    async fn delete(&self, token_id: AccessTokenId) -> AuthResult<()>;

    /// Revoke every token of a user
    async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64>;
}

/// Password reset token repository trait
#[trait_variant::make(PasswordResetRepository: Send)]
pub trait LocalPasswordResetRepository {
    /// Insert, or replace the pending reset of the same email
    async fn upsert(&self, reset: &PasswordReset) -> AuthResult<()>;

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<PasswordReset>>;

    async fn delete_for_email(&self, email: &Email) -> AuthResult<u64>;

    /// Drop resets created at or before `cutoff`
    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}
