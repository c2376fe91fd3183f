use crate::server::data::refresh_token::RefreshTokenRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests storing and finding a token by hash.
///
/// Expected: the stored token is found, unknown hashes are not
#[tokio::test]
async fn creates_and_finds_by_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);

    let expires_at = Utc::now() + Duration::days(1);
    let created = repo
        .create(user.id, "a".repeat(64), expires_at)
        .await?;

    let found = repo.find_by_hash(&"a".repeat(64)).await?.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.user_id, user.id);
    assert!(found.revoked_at.is_none());

    assert!(repo.find_by_hash(&"b".repeat(64)).await?.is_none());

    Ok(())
}

/// Tests revocation is applied once and keeps the first timestamp.
///
/// Expected: first revoke true, second revoke false, timestamp unchanged
#[tokio::test]
async fn revokes_only_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let token = factory::refresh_token::RefreshTokenFactory::new(db, user.id)
        .token_hash("c".repeat(64))
        .build()
        .await?;

    let repo = RefreshTokenRepository::new(db);
    let first = Utc::now() - Duration::minutes(10);

    assert!(repo.revoke(token.id, first).await?);
    assert!(!repo.revoke(token.id, Utc::now()).await?);

    let stored = repo.find_by_hash(&"c".repeat(64)).await?.unwrap();
    assert!(stored.is_revoked());
    assert_eq!(
        stored.revoked_at.unwrap().timestamp(),
        first.timestamp()
    );

    Ok(())
}
