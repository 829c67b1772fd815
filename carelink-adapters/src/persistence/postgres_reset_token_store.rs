use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use carelink_core::{Email, ResetToken, ResetTokenStore, ResetTokenStoreError};

use super::generate_reset_token;

/// Postgres-backed reset-token store.
///
/// Consumption is a single conditional `UPDATE ... WHERE used = FALSE`, so
/// two concurrent callers racing on the same token cannot both succeed.
/// Rows are never deleted; spent and superseded tokens stay as audit trail.
pub struct PostgresResetTokenStore {
    pool: PgPool,
    ttl: Duration,
}

impl PostgresResetTokenStore {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }
}

#[async_trait]
impl ResetTokenStore for PostgresResetTokenStore {
    #[tracing::instrument(name = "Issuing reset token", skip_all)]
    async fn issue(&self, email: &Email) -> Result<ResetToken, ResetTokenStoreError> {
        let token = generate_reset_token();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| ResetTokenStoreError::Unexpected("ttl out of range".to_string()))?;

        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        // Supersede: at most one unused, unexpired token may be valid per email.
        sqlx::query(
            "UPDATE password_resets SET used = TRUE, updated_at = now() \
             WHERE email = $1 AND used = FALSE",
        )
        .bind(email.as_str())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        sqlx::query(
            "INSERT INTO password_resets (id, email, token, expires_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(email.as_str())
        .bind(token.as_str())
        .bind(expires_at)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;

        Ok(token)
    }

    #[tracing::instrument(name = "Consuming reset token", skip_all)]
    async fn consume(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        let row: Option<ResetRequestRow> = sqlx::query_as(
            "UPDATE password_resets SET used = TRUE, updated_at = now() \
             WHERE token = $1 AND used = FALSE \
             RETURNING email, expires_at",
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        let Some(row) = row else {
            return Err(ResetTokenStoreError::InvalidToken);
        };

        if Utc::now() > row.expires_at {
            return Err(ResetTokenStoreError::ExpiredToken);
        }

        Email::try_from(row.email).map_err(|e| ResetTokenStoreError::Unexpected(e.to_string()))
    }
}

#[derive(Debug, FromRow)]
struct ResetRequestRow {
    email: String,
    expires_at: DateTime<Utc>,
}

fn unexpected(error: sqlx::Error) -> ResetTokenStoreError {
    ResetTokenStoreError::Unexpected(error.to_string())
}
