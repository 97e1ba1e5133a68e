use std::env;
use std::fmt;

use auth::TokenLifetimes;
use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_ttl_minutes() -> i64 {
    15
}

fn default_refresh_token_ttl_days() -> i64 {
    7
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"**redacted**")
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .finish()
    }
}

impl JwtConfig {
    /// Token lifetimes derived from the configured TTLs
    ///
    /// # Errors
    /// * `Message` - A TTL is not positive or does not fit a duration
    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, ConfigError> {
        if self.access_token_ttl_minutes <= 0 || self.refresh_token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".into(),
            ));
        }

        let access = Duration::try_minutes(self.access_token_ttl_minutes).ok_or_else(|| {
            ConfigError::Message("jwt.access_token_ttl_minutes is out of range".into())
        })?;
        let refresh = Duration::try_days(self.refresh_token_ttl_days).ok_or_else(|| {
            ConfigError::Message("jwt.refresh_token_ttl_days is out of range".into())
        })?;

        // Tokens carry an absolute expiry, which must stay representable
        let now = Utc::now();
        if now.checked_add_signed(access).is_none() || now.checked_add_signed(refresh).is_none() {
            return Err(ConfigError::Message(
                "jwt token lifetimes reach past the representable time range".into(),
            ));
        }

        Ok(TokenLifetimes::new(access, refresh))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        self.token_lifetimes()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}
