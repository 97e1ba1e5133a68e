use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenKind;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::SignupCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::UserProfile;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::session::models::RefreshTokenRecord;
use crate::domain::session::ports::RefreshTokenLedger;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;

/// Domain service implementation for authentication.
///
/// Holds no request state: everything durable lives behind the directory and
/// the ledger, and the signing secret lives inside the injected authenticator.
pub struct AuthService<UD, RL>
where
    UD: UserDirectory,
    RL: RefreshTokenLedger,
{
    directory: Arc<UD>,
    ledger: Arc<RL>,
    authenticator: Arc<Authenticator>,
}

impl<UD, RL> AuthService<UD, RL>
where
    UD: UserDirectory,
    RL: RefreshTokenLedger,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User account store
    /// * `ledger` - Refresh token store
    /// * `authenticator` - Password hasher and token codec bound to the signing secret
    pub fn new(directory: Arc<UD>, ledger: Arc<RL>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            ledger,
            authenticator,
        }
    }

    /// Resolve an account from raw credentials. Every failure collapses into
    /// `InvalidCredentials` so callers cannot probe which emails exist.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // Unknown and malformed emails pay for a verification too, so response
        // time does not reveal which accounts exist.
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            self.authenticator.verify_password_decoy(password);
            tracing::debug!("Login rejected: malformed email");
            return Err(AuthError::InvalidCredentials);
        };

        match self.directory.find_by_email(&email).await? {
            Some(user) if self.authenticator.verify_password(password, &user.password_hash) => {
                Ok(user)
            }
            Some(user) => {
                tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
                Err(AuthError::InvalidCredentials)
            }
            None => {
                self.authenticator.verify_password_decoy(password);
                tracing::info!("Login rejected: unknown email");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[async_trait]
impl<UD, RL> AuthServicePort for AuthService<UD, RL>
where
    UD: UserDirectory,
    RL: RefreshTokenLedger,
{
    async fn signup(&self, command: SignupCommand) -> Result<UserProfile, AuthError> {
        if self
            .directory
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        if self
            .directory
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUsername(command.username.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        // A concurrent signup can still win between the checks above and this
        // insert; the directory's conflict is authoritative.
        let created_user = self.directory.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User signed up");

        Ok(UserProfile::from(&created_user))
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self.verify_credentials(email, password).await?;

        let access = self
            .authenticator
            .issue_token(user.id, TokenKind::Access)
            .map_err(AuthError::TokenIssuance)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(access.token)
    }

    async fn login_with_refresh(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenPair, AuthError> {
        let user = self.verify_credentials(email, password).await?;

        let now = Utc::now();
        let access = self
            .authenticator
            .issue_token_at(user.id, TokenKind::Access, now)
            .map_err(AuthError::TokenIssuance)?;
        let refresh = self
            .authenticator
            .issue_token_at(user.id, TokenKind::Refresh, now)
            .map_err(AuthError::TokenIssuance)?;

        let record =
            RefreshTokenRecord::issue(user.id, refresh.token.clone(), refresh.expires_at, now);
        let record_id = record.id;
        self.ledger.record(record).await?;

        tracing::info!(
            user_id = %user.id,
            refresh_token_id = %record_id,
            "User logged in with refresh token"
        );

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let now = Utc::now();

        let claims = self
            .authenticator
            .validate_token_at(refresh_token, TokenKind::Refresh, now)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthError::InvalidRefreshToken(e)
            })?;

        // The signature alone is not enough: the ledger decides revocation.
        let record = self
            .ledger
            .find_active_by_value(refresh_token, now)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Refresh token has no active ledger record");
                AuthError::RefreshTokenNotRecognized
            })?;

        if UserId::from_string(&claims.sub).ok() != Some(record.user_id) {
            tracing::warn!(
                refresh_token_id = %record.id,
                user_id = %record.user_id,
                "Refresh token subject does not match ledger owner"
            );
            return Err(AuthError::TokenOwnershipMismatch);
        }

        let access = self
            .authenticator
            .issue_token_at(record.user_id, TokenKind::Access, now)
            .map_err(AuthError::TokenIssuance)?;

        tracing::debug!(user_id = %record.user_id, "Access token refreshed");

        Ok(access.token)
    }

    async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<(), AuthError> {
        if !self.ledger.revoke_by_value(refresh_token).await? {
            tracing::debug!("Revocation requested for unknown refresh token");
            return Err(AuthError::TokenNotFound);
        }

        tracing::info!("Refresh token revoked");

        Ok(())
    }
}
