//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AccessTokenId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{
    access_token::AccessToken,
    password_reset::PasswordReset,
    user::{NewUser, User},
};
use crate::domain::repository::{AccessTokenRepository, PasswordResetRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, secret_token::SecretToken, user_name::UserName, user_password::UserPassword,
};
use crate::error::AuthResult;

const USER_COLUMNS: &str = "id, name, email, password, verification_token, email_verified_at, \
                            created_at, updated_at";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Drop password resets older than `ttl`
    pub async fn cleanup_expired_resets(&self, ttl: chrono::Duration) -> AuthResult<u64> {
        let deleted = PasswordResetRepository::purge_created_before(self, Utc::now() - ttl).await?;

        tracing::info!(resets_deleted = deleted, "Cleaned up expired password resets");

        Ok(deleted)
    }

    async fn fetch_user(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password, verification_token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password, verification_token,
                      email_verified_at, created_at, updated_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.verification_token.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_user("LOWER(email)", email.as_str()).await
    }

    async fn find_by_verification_token(&self, token: &str) -> AuthResult<Option<User>> {
        self.fetch_user("verification_token", token).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password = $3,
                verification_token = $4,
                email_verified_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.get())
        .bind(user.name.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.verification_token.as_ref().map(SecretToken::as_str))
        .bind(user.email_verified_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Access Token Repository Implementation
// ============================================================================

impl AccessTokenRepository for PgAuthRepository {
    async fn create(
        &self,
        user_id: UserId,
        name: &str,
        digest: &[u8; 32],
    ) -> AuthResult<AccessTokenId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO personal_access_tokens (user_id, name, token_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id.get())
        .bind(name)
        .bind(digest.as_slice())
        .fetch_one(&self.pool)
        .await?;

        Ok(AccessTokenId::new(id))
    }

    async fn find_by_digest(&self, digest: &[u8; 32]) -> AuthResult<Option<AccessToken>> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT id, user_id, name, created_at, last_used_at
            FROM personal_access_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(digest.as_slice())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccessTokenRow::into_token))
    }

    async fn touch(&self, token_id: AccessTokenId, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE personal_access_tokens SET last_used_at = $2 WHERE id = $1")
            .bind(token_id.get())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, token_id: AccessTokenId) -> AuthResult<()> {
        sqlx::query("DELETE FROM personal_access_tokens WHERE id = $1")
            .bind(token_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM personal_access_tokens WHERE user_id = $1")
            .bind(user_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Password Reset Repository Implementation
// ============================================================================

impl PasswordResetRepository for PgAuthRepository {
    async fn upsert(&self, reset: &PasswordReset) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (email, token, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE SET
                token = EXCLUDED.token,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(reset.email.as_str())
        .bind(reset.token.as_str())
        .bind(reset.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<PasswordReset>> {
        let row = sqlx::query_as::<_, PasswordResetRow>(
            "SELECT email, token, created_at FROM password_reset_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PasswordResetRow::into_reset))
    }

    async fn delete_for_email(&self, email: &Email) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM password_reset_tokens WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM password_reset_tokens WHERE created_at <= $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    verification_token: Option<String>,
    email_verified_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::new(self.id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password: UserPassword::from_db(self.password)?,
            verification_token: self.verification_token.map(SecretToken::from_raw),
            email_verified_at: self.email_verified_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccessTokenRow {
    id: i64,
    user_id: i64,
    name: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
}

impl AccessTokenRow {
    fn into_token(self) -> AccessToken {
        AccessToken {
            id: AccessTokenId::new(self.id),
            user_id: UserId::new(self.user_id),
            name: self.name,
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PasswordResetRow {
    email: String,
    token: String,
    created_at: DateTime<Utc>,
}

impl PasswordResetRow {
    fn into_reset(self) -> PasswordReset {
        PasswordReset {
            email: Email::from_db(self.email),
            token: SecretToken::from_raw(self.token),
            created_at: self.created_at,
        }
    }
}
