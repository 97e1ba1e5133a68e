pub mod refresh_token;
pub mod user;

pub use refresh_token::PostgresRefreshTokenLedger;
pub use user::PostgresUserDirectory;
