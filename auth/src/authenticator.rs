use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetimes of the two token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    pub fn new(access: Duration, refresh: Duration) -> Self {
        Self { access, refresh }
    }

    /// Lifetime for a token kind.
    pub fn for_kind(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access,
            TokenKind::Refresh => self.refresh,
        }
    }
}

impl Default for TokenLifetimes {
    /// 15 minute access tokens, 7 day refresh tokens.
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Authentication coordinator combining password hashing and token handling.
///
/// Owns the signing secret (inside its [`JwtHandler`]) and the token
/// lifetimes, and reads the clock on behalf of callers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    lifetimes: TokenLifetimes,
}

impl Authenticator {
    /// Create a new authenticator with default token lifetimes.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_lifetimes(jwt_secret, TokenLifetimes::default())
    }

    /// Create a new authenticator with explicit token lifetimes.
    pub fn with_lifetimes(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Spend a full password verification without an account to check against.
    pub fn verify_password_decoy(&self, password: &str) {
        self.password_hasher.verify_decoy(password)
    }

    /// Issue a token of `kind` for `subject`, starting now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        subject: impl ToString,
        kind: TokenKind,
    ) -> Result<IssuedToken, JwtError> {
        self.issue_token_at(subject, kind, Utc::now())
    }

    /// Issue a token of `kind` for `subject`, starting at `now`.
    pub fn issue_token_at(
        &self,
        subject: impl ToString,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        self.jwt_handler
            .issue(subject, kind, self.lifetimes.for_kind(kind), now)
    }

    /// Validate a token of the expected kind against the current time.
    ///
    /// # Errors
    /// * `InvalidToken`, `TokenExpired`, `KindMismatch`
    pub fn validate_token(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        self.validate_token_at(token, expected, Utc::now())
    }

    /// Validate a token of the expected kind against `now`.
    pub fn validate_token_at(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token, expected, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_default_lifetimes() {
        let lifetimes = TokenLifetimes::default();
        assert_eq!(lifetimes.for_kind(TokenKind::Access), Duration::minutes(15));
        assert_eq!(lifetimes.for_kind(TokenKind::Refresh), Duration::days(7));
    }

    #[test]
    fn test_password_round_trip() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash));
        assert!(!authenticator.verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_issue_uses_lifetime_per_kind() {
        let authenticator = Authenticator::new(SECRET);
        let now = Utc::now();

        let access = authenticator
            .issue_token_at("user123", TokenKind::Access, now)
            .expect("Failed to issue token");
        let refresh = authenticator
            .issue_token_at("user123", TokenKind::Refresh, now)
            .expect("Failed to issue token");

        assert_eq!(access.claims.exp - access.claims.iat, 15 * 60);
        assert_eq!(refresh.claims.exp - refresh.claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET);

        let issued = authenticator
            .issue_token("user123", TokenKind::Access)
            .expect("Failed to issue token");

        let claims = authenticator
            .validate_token(&issued.token, TokenKind::Access)
            .expect("Failed to validate token");

        assert_eq!(claims.sub, "user123");
    }

    #[test]
    fn test_custom_lifetimes_expire() {
        let lifetimes = TokenLifetimes::new(Duration::seconds(30), Duration::hours(1));
        let authenticator = Authenticator::with_lifetimes(SECRET, lifetimes);
        let now = Utc::now();

        let issued = authenticator
            .issue_token_at("user123", TokenKind::Access, now)
            .expect("Failed to issue token");

        let later = now + Duration::seconds(31);
        let result = authenticator.validate_token_at(&issued.token, TokenKind::Access, later);
        assert_eq!(result, Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token("invalid.token.here", TokenKind::Access);
        assert!(result.is_err());
    }
}
