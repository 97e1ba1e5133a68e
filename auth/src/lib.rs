//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the account service:
//! - Password hashing (Argon2id, fixed work factor, per-call salt)
//! - Signed access and refresh tokens (HS256 JWT with a kind discriminator)
//! - An `Authenticator` combining both with configured token lifetimes
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Access and Refresh Tokens
//! ```
//! use auth::{Authenticator, TokenKind};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let refresh = auth.issue_token("user123", TokenKind::Refresh).unwrap();
//! let claims = auth.validate_token(&refresh.token, TokenKind::Refresh).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! // A refresh token is never accepted where an access token is expected
//! assert!(auth.validate_token(&refresh.token, TokenKind::Access).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
