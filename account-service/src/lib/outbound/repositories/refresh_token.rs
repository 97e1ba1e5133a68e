use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::session::errors::LedgerError;
use crate::domain::session::models::RefreshTokenId;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenLedger;
use crate::domain::user::models::UserId;

pub struct PostgresRefreshTokenLedger {
    pool: PgPool,
}

impl PostgresRefreshTokenLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    user_id: Uuid,
    token: String,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshTokenRecord {
    fn from(row: RefreshTokenRow) -> Self {
        Self {
            id: RefreshTokenId(row.id),
            user_id: UserId(row.user_id),
            token: row.token,
            expires_at: row.expires_at,
            revoked: row.revoked,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RefreshTokenLedger for PostgresRefreshTokenLedger {
    async fn record(&self, record: RefreshTokenRecord) -> Result<(), LedgerError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, revoked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.0)
        .bind(record.user_id.0)
        .bind(&record.token)
        .bind(record.expires_at)
        .bind(record.revoked)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("refresh_tokens_token_key")
                {
                    return LedgerError::DuplicateToken;
                }
            }
            LedgerError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn find_active_by_value(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, LedgerError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, user_id, token, expires_at, revoked, created_at
            FROM refresh_tokens
            WHERE token = $1 AND revoked = FALSE AND expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        Ok(row.map(RefreshTokenRecord::from))
    }

    async fn revoke_by_value(&self, token: &str) -> Result<bool, LedgerError> {
        // Matching an already revoked row still counts, so repeat logouts succeed.
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
