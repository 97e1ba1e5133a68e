use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::UserProfile;

/// Port for authentication operations exposed to inbound adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email, username and policy-checked password
    ///
    /// # Returns
    /// Created account without its password hash
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered (checked first)
    /// * `DuplicateUsername` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `Store` - Directory operation failed
    async fn signup(&self, command: SignupCommand) -> Result<UserProfile, AuthError>;

    /// Check credentials and issue an access token only.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TokenIssuance` - Token signing failed
    /// * `Store` - Directory operation failed
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Check credentials, issue an access and a refresh token, and record the
    /// refresh token in the ledger.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `TokenIssuance` - Token signing failed
    /// * `Store` - Directory or ledger operation failed
    async fn login_with_refresh(&self, email: &str, password: &str)
        -> Result<TokenPair, AuthError>;

    /// Exchange a live refresh token for a new access token.
    ///
    /// The refresh token itself is left unchanged.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Bad signature, malformed, expired or not a refresh token
    /// * `RefreshTokenNotRecognized` - No active ledger record for this token
    /// * `TokenOwnershipMismatch` - Ledger owner differs from the token subject
    /// * `Store` - Ledger operation failed
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Revoke a refresh token (logout).
    ///
    /// # Errors
    /// * `TokenNotFound` - No ledger record for this token
    /// * `Store` - Ledger operation failed
    async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<(), AuthError>;
}
