use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Command to register a new account with validated fields
#[derive(Debug)]
pub struct SignupCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
}

impl SignupCommand {
    /// Construct a new signup command.
    ///
    /// # Arguments
    /// * `email` - Validated, normalized email address
    /// * `username` - Validated username
    /// * `password` - Plaintext password that passed the policy (hashed by the service)
    pub fn new(email: EmailAddress, username: Username, password: Password) -> Self {
        Self {
            email,
            username,
            password,
        }
    }
}

/// Account as returned to callers: everything but the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub username: Username,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Access and refresh token issued together at login.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"**redacted**")
            .field("refresh_token", &"**redacted**")
            .finish()
    }
}
