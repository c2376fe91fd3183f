use super::*;

/// Tests the full registration, verification and login flow.
///
/// Verifies the mailed token activates the account, logs the user in, and can be
/// presented a second time without error.
///
/// Expected: active user, tokens on both verify calls, login succeeds
#[tokio::test]
async fn verifies_email_and_logs_in() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();
    let auth = services.auth(db);

    auth.register(register_param("heidi", "heidi@example.com"))
        .await?;
    let raw = services.mail.last_token().await.unwrap();

    let tokens = auth.verify_email(&raw).await?;
    let user = UserRepository::new(db)
        .find_by_email("heidi@example.com")
        .await?
        .unwrap();
    assert!(user.is_active);
    assert_eq!(
        services.jwt.verify(&tokens.access_token).unwrap().user_id(),
        Some(user.id)
    );

    auth.verify_email(&raw).await?;
    auth.login("heidi@example.com", "s3cret-pass").await?;

    Ok(())
}

/// Tests blank, unknown and expired verification tokens.
///
/// Expected: Required, Invalid and Expired errors; user stays inactive
#[tokio::test]
async fn rejects_bad_verification_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = factory::user::create_inactive_user(db).await?;
    factory::email_verification_token::EmailVerificationTokenFactory::new(db, user.id)
        .token_hash(hash_token("expired-raw"))
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let auth = services.auth(db);

    let err = auth.verify_email("  ").await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Required(TokenKind::Verification));

    let err = auth.verify_email("bogus").await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Invalid(TokenKind::Verification));

    let err = auth.verify_email("expired-raw").await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Expired(TokenKind::Verification));

    assert!(!UserRepository::new(db).find_by_id(user.id).await?.unwrap().is_active);

    Ok(())
}

/// Tests resend only mails unverified accounts and replaces the previous token.
///
/// Expected: one mail for the inactive user, none for unknown or active users,
/// the first token no longer valid
#[tokio::test]
async fn resends_verification_for_inactive_users_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();
    let auth = services.auth(db);

    auth.register(register_param("ivan", "ivan@example.com"))
        .await?;
    let first = services.mail.last_token().await.unwrap();

    let active = factory::user::create_user(db).await?;
    auth.resend_verification(&active.email).await?;
    auth.resend_verification("ghost@example.com").await?;
    auth.resend_verification("").await?;
    assert_eq!(services.mail.sent().await.len(), 1);

    auth.resend_verification(" IVAN@example.com").await?;
    assert_eq!(services.mail.sent().await.len(), 2);
    let second = services.mail.last_token().await.unwrap();
    assert_ne!(first, second);

    let err = auth.verify_email(&first).await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Invalid(TokenKind::Verification));
    auth.verify_email(&second).await?;

    Ok(())
}

/// Tests resend normalizes the address the same way registration does.
///
/// Expected: whitespace-only input is ignored; a padded upper-case address reaches the
/// account and the mail goes to the stored lower-case address
#[tokio::test]
async fn resend_normalizes_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();
    let auth = services.auth(db);

    let user = factory::user::UserFactory::new(db)
        .email("nina@example.com")
        .active(false)
        .build()
        .await?;

    auth.resend_verification("   ").await?;
    assert!(services.mail.sent().await.is_empty());

    auth.resend_verification("  NINA@Example.COM\t").await?;
    let sent = services.mail.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, user.email);

    Ok(())
}
