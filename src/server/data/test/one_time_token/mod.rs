use crate::server::{
    data::{
        email_change_token::EmailChangeTokenRepository,
        email_verification_token::EmailVerificationTokenRepository,
        password_change_token::PasswordChangeTokenRepository,
    },
    model::token::OneTimeToken,
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests a verification token can be stored, found and confirmed once.
///
/// Expected: confirm returns true, then false; confirmed_at keeps the first value
#[tokio::test]
async fn confirms_verification_token_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_inactive_user(db).await?;
    let repo = EmailVerificationTokenRepository::new(db);

    let token = repo
        .create(user.id, "d".repeat(64), Utc::now() + Duration::hours(1))
        .await?;
    assert!(!token.is_confirmed());

    let first = Utc::now() - Duration::minutes(1);
    assert!(repo.confirm(token.id, first).await?);
    assert!(!repo.confirm(token.id, Utc::now()).await?);

    let stored = repo.find_by_hash(&"d".repeat(64)).await?.unwrap();
    assert!(stored.is_confirmed());
    assert_eq!(stored.confirmed_at.unwrap().timestamp(), first.timestamp());

    Ok(())
}

/// Tests deleting verification tokens only removes the user's own tokens.
///
/// Expected: two deleted for the user, the other user's token remains
#[tokio::test]
async fn deletes_verification_tokens_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_inactive_user(db).await?;
    let other = factory::user::create_inactive_user(db).await?;
    factory::create_verification_token(db, user.id).await?;
    factory::create_verification_token(db, user.id).await?;
    let kept = factory::email_verification_token::EmailVerificationTokenFactory::new(db, other.id)
        .token_hash("e".repeat(64))
        .build()
        .await?;

    let repo = EmailVerificationTokenRepository::new(db);

    assert_eq!(repo.delete_by_user(user.id).await?, 2);
    assert_eq!(
        repo.find_by_hash(&"e".repeat(64)).await?.unwrap().id,
        kept.id
    );

    Ok(())
}

/// Tests an email change token carries its target address.
///
/// Expected: new_email round-trips, delete_by_user removes it
#[tokio::test]
async fn stores_email_change_target() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = EmailChangeTokenRepository::new(db);

    repo.create(
        user.id,
        "f".repeat(64),
        "next@example.com".to_string(),
        Utc::now() + Duration::hours(1),
    )
    .await?;

    let found = repo.find_by_hash(&"f".repeat(64)).await?.unwrap();
    assert_eq!(found.new_email, "next@example.com");
    assert_eq!(found.user_id, user.id);

    assert_eq!(repo.delete_by_user(user.id).await?, 1);
    assert!(repo.find_by_hash(&"f".repeat(64)).await?.is_none());

    Ok(())
}

/// Tests a password change token keeps the new hash and reports expiry.
///
/// Expected: stored hash matches, expired token reports is_expired
#[tokio::test]
async fn stores_password_change_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let repo = PasswordChangeTokenRepository::new(db);

    repo.create(
        user.id,
        "0".repeat(64),
        "argon-hash".to_string(),
        Utc::now() - Duration::minutes(1),
    )
    .await?;

    let found = repo.find_by_hash(&"0".repeat(64)).await?.unwrap();
    assert_eq!(found.new_password_hash, "argon-hash");
    assert!(found.is_expired(Utc::now()));
    assert!(repo.confirm(found.id, Utc::now()).await?);

    Ok(())
}
