use super::*;

/// Tests requesting and confirming a password change.
///
/// Verifies the link goes to the current address and the old password keeps
/// working until the change is confirmed.
///
/// Expected: login works with the new password only after confirmation
#[tokio::test]
async fn changes_password_after_confirmation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .email("mia@example.com")
            .build()
            .await?,
    );
    let profile = services.profile(db);
    let auth = services.auth(db);

    profile
        .request_password_change(&user, DEFAULT_PASSWORD, "brand-new-secret")
        .await?;

    let sent = services.mail.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "mia@example.com");
    assert_eq!(sent[0].subject, "Confirm your password change");

    auth.login("mia@example.com", DEFAULT_PASSWORD).await?;

    let raw = services.mail.last_token().await.unwrap();
    profile.confirm_password_change(&raw).await?;

    auth.login("mia@example.com", "brand-new-secret").await?;
    let err = auth
        .login("mia@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::InvalidCredentials));

    profile.confirm_password_change(&raw).await?;

    Ok(())
}

/// Tests the request checks the current password and rejects reuse.
///
/// Expected: InvalidCredentials, Required("New password") and PasswordSameAsCurrent
#[tokio::test]
async fn rejects_invalid_password_change_requests() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = User::from_entity(factory::user::create_user(db).await?);
    let profile = services.profile(db);

    let err = profile
        .request_password_change(&user, "not-my-password", "whatever-else")
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::InvalidCredentials));

    let err = profile
        .request_password_change(&user, DEFAULT_PASSWORD, "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Required("New password")));

    let err = profile
        .request_password_change(&user, DEFAULT_PASSWORD, DEFAULT_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::PasswordSameAsCurrent));

    assert!(services.mail.sent().await.is_empty());

    Ok(())
}

/// Tests a new request supersedes the pending one.
///
/// Expected: the first link is invalid once a second request was made
#[tokio::test]
async fn new_request_replaces_pending_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = User::from_entity(factory::user::create_user(db).await?);
    let profile = services.profile(db);

    profile
        .request_password_change(&user, DEFAULT_PASSWORD, "first-choice")
        .await?;
    let first = services.mail.last_token().await.unwrap();
    profile
        .request_password_change(&user, DEFAULT_PASSWORD, "second-choice")
        .await?;

    let err = profile.confirm_password_change(&first).await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Invalid(TokenKind::PasswordChange));

    Ok(())
}

/// Tests an expired password change token.
///
/// Expected: Err(TokenError::Expired)
#[tokio::test]
async fn rejects_expired_password_change_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = factory::user::create_user(db).await?;
    factory::password_change_token::PasswordChangeTokenFactory::new(db, user.id)
        .token_hash(hash_token("old-link"))
        .expires_at(Utc::now() - Duration::hours(2))
        .build()
        .await?;

    let err = services
        .profile(db)
        .confirm_password_change("old-link")
        .await
        .unwrap_err();

    assert_eq!(token_err(err), TokenError::Expired(TokenKind::PasswordChange));

    Ok(())
}
