use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::AuthToken;

pub struct AuthTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthTokenRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Return the token held by `username`, creating one if they have none yet
    pub async fn issue(&self, username: &str) -> Result<AuthToken> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (key, username)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
            RETURNING key, username, created
            "#,
        )
        .bind(AuthToken::generate_key())
        .bind(username)
        .fetch_one(self.pool)
        .await?;

        Ok(token)
    }

    /// Find the token matching a presented key
    pub async fn find_by_key(&self, key: &str) -> Result<Option<AuthToken>> {
        let token = sqlx::query_as::<_, AuthToken>(
            "SELECT key, username, created FROM auth_tokens WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?;

        Ok(token)
    }

    /// Revoke the token held by `username`
    pub async fn revoke(&self, username: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE username = $1")
            .bind(username)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
