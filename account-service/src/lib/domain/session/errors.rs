use thiserror::Error;

/// Error for refresh token ledger operations
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Refresh token already recorded")]
    DuplicateToken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
