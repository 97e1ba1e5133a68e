use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::LedgerError;
use crate::domain::session::models::RefreshTokenRecord;

/// Durable record of issued refresh tokens.
///
/// Every method is a single atomic store operation; a cancelled call either
/// completed or left nothing behind.
#[async_trait]
pub trait RefreshTokenLedger: Send + Sync + 'static {
    /// Persist a newly issued refresh token.
    ///
    /// # Errors
    /// * `DuplicateToken` - A record with the same token value exists
    /// * `DatabaseError` - Database operation failed
    async fn record(&self, record: RefreshTokenRecord) -> Result<(), LedgerError>;

    /// Find the record for `token` if it is unrevoked and `expires_at > now`.
    ///
    /// # Returns
    /// Optional record (None if unknown, revoked or expired)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_active_by_value(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, LedgerError>;

    /// Mark the record for `token` as revoked.
    ///
    /// Idempotent: revoking an already revoked token succeeds again.
    ///
    /// # Returns
    /// Whether a record with that token value exists
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke_by_value(&self, token: &str) -> Result<bool, LedgerError>;
}
