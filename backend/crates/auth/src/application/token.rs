//! Bearer token issuing and resolution.

use chrono::Utc;
use kernel::id::{AccessTokenId, UserId};

use crate::domain::entity::access_token::DEFAULT_TOKEN_NAME;
use crate::domain::entity::user::User;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::secret_token::SecretToken;
use crate::error::{AuthError, AuthResult};

/// Mint a token for `user_id` and persist its digest. The plain value is
/// returned once and never stored.
pub async fn issue_access_token<T>(repo: &T, user_id: UserId) -> AuthResult<SecretToken>
where
    T: AccessTokenRepository,
{
    let token = SecretToken::access_token();
    let token_id = repo.create(user_id, DEFAULT_TOKEN_NAME, &token.digest()).await?;

    tracing::debug!(user_id = %user_id, token_id = %token_id, "Access token issued");

    Ok(token)
}

/// Caller identity resolved from a bearer token
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: User,
    pub token_id: AccessTokenId,
}

/// Look up the owner of a presented bearer token and record its use
pub async fn authenticate<U, T>(
    user_repo: &U,
    token_repo: &T,
    raw: &str,
) -> AuthResult<Authenticated>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    let digest = SecretToken::from_raw(raw).digest();
    let token = token_repo
        .find_by_digest(&digest)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    let user = user_repo
        .find_by_id(token.user_id)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    token_repo.touch(token.id, Utc::now()).await?;

    Ok(Authenticated {
        user,
        token_id: token.id,
    })
}
