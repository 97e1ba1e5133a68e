//! Adapter tests against a real PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored` once `DATABASE_URL` points at a server
//! the tests may create databases on.

mod common;

use account_service::domain::session::errors::LedgerError;
use account_service::domain::session::models::RefreshTokenRecord;
use account_service::domain::session::ports::RefreshTokenLedger;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::models::Username;
use account_service::domain::user::ports::UserDirectory;
use account_service::outbound::repositories::PostgresRefreshTokenLedger;
use account_service::outbound::repositories::PostgresUserDirectory;
use account_service::user::errors::UserError;
use chrono::Duration;
use chrono::Utc;
use common::TestDb;

fn user(email: &str, username: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_user_directory_round_trip() {
    let db = TestDb::new().await;
    let directory = PostgresUserDirectory::new(db.pool.clone());

    let created = directory.create(user("a@x.com", "alice123")).await.unwrap();

    let by_email = directory
        .find_by_email(&EmailAddress::new("a@x.com".to_string()).unwrap())
        .await
        .unwrap()
        .expect("User not found by email");
    let by_username = directory
        .find_by_username(&Username::new("alice123".to_string()).unwrap())
        .await
        .unwrap()
        .expect("User not found by username");

    assert_eq!(by_email.id, created.id);
    assert_eq!(by_username.id, created.id);
    assert_eq!(by_email.password_hash, created.password_hash);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_user_directory_unique_constraints() {
    let db = TestDb::new().await;
    let directory = PostgresUserDirectory::new(db.pool.clone());

    directory.create(user("a@x.com", "alice123")).await.unwrap();

    let result = directory.create(user("a@x.com", "bob456")).await;
    assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));

    let result = directory.create(user("b@x.com", "alice123")).await;
    assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_token_ledger_lifecycle() {
    let db = TestDb::new().await;
    let directory = PostgresUserDirectory::new(db.pool.clone());
    let ledger = PostgresRefreshTokenLedger::new(db.pool.clone());

    let owner = directory.create(user("a@x.com", "alice123")).await.unwrap();
    let now = Utc::now();
    let record = RefreshTokenRecord::issue(
        owner.id,
        "refresh-token-value".to_string(),
        now + Duration::days(7),
        now,
    );

    ledger.record(record.clone()).await.unwrap();

    // Fresh id, same token value: only the token column collides
    let same_token = RefreshTokenRecord::issue(
        owner.id,
        "refresh-token-value".to_string(),
        now + Duration::days(7),
        now,
    );
    assert_ne!(same_token.id, record.id);
    let result = ledger.record(same_token).await;
    assert!(matches!(result, Err(LedgerError::DuplicateToken)));

    let active = ledger
        .find_active_by_value("refresh-token-value", now)
        .await
        .unwrap()
        .expect("Record not active");
    assert_eq!(active.user_id, owner.id);

    // Expiry is evaluated against the supplied clock
    let later = ledger
        .find_active_by_value("refresh-token-value", now + Duration::days(8))
        .await
        .unwrap();
    assert!(later.is_none());

    assert!(ledger.revoke_by_value("refresh-token-value").await.unwrap());
    assert!(ledger.revoke_by_value("refresh-token-value").await.unwrap());
    assert!(!ledger.revoke_by_value("unknown").await.unwrap());

    let revoked = ledger
        .find_active_by_value("refresh-token-value", now)
        .await
        .unwrap();
    assert!(revoked.is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_refresh_tokens_outlive_account_deletion_attempts() {
    let db = TestDb::new().await;
    let directory = PostgresUserDirectory::new(db.pool.clone());
    let ledger = PostgresRefreshTokenLedger::new(db.pool.clone());

    let owner = directory.create(user("a@x.com", "alice123")).await.unwrap();
    let now = Utc::now();
    ledger
        .record(RefreshTokenRecord::issue(
            owner.id,
            "audited-token".to_string(),
            now + Duration::days(7),
            now,
        ))
        .await
        .unwrap();

    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(owner.id.0)
        .execute(&db.pool)
        .await;
    assert!(deleted.is_err());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE user_id = $1")
        .bind(owner.id.0)
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}
