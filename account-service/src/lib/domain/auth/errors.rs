use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::session::errors::LedgerError;
use crate::user::errors::UserError;

/// Failures of the authentication operations.
///
/// The three refresh failures are told apart here for diagnosis only; the
/// HTTP adapter reports all of them as one "please log in again".
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Signup conflicts
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    // Login failure, never says which check failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Refresh failures
    #[error("Invalid refresh token: {0}")]
    InvalidRefreshToken(JwtError),

    #[error("Refresh token not recognized or expired")]
    RefreshTokenNotRecognized,

    #[error("Refresh token does not belong to its subject")]
    TokenOwnershipMismatch,

    // Logout failure
    #[error("Refresh token not found")]
    TokenNotFound,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(JwtError),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::DuplicateEmail(email),
            UserError::UsernameAlreadyExists(username) => AuthError::DuplicateUsername(username),
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::DatabaseError(_) => AuthError::Store(err.to_string()),
        }
    }
}

impl From<LedgerError> for AuthError {
    fn from(err: LedgerError) -> Self {
        AuthError::Store(err.to_string())
    }
}
