//! Logout Use Case
//!
//! Revokes the bearer token of the current request. Other tokens of the
//! same user stay valid.

use std::sync::Arc;

use kernel::id::AccessTokenId;

use crate::domain::repository::AccessTokenRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<T>
where
    T: AccessTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: AccessTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    pub async fn execute(&self, token_id: AccessTokenId) -> AuthResult<()> {
        self.token_repo.delete(token_id).await?;
        tracing::info!(token_id = %token_id, "Access token revoked");
        Ok(())
    }
}
