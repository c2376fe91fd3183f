use super::*;

/// Tests requesting and confirming an email change.
///
/// Verifies the link goes to the new address, the email is unchanged until
/// confirmation, and a second confirmation is a no-op.
///
/// Expected: email updated once, second confirm Ok
#[tokio::test]
async fn changes_email_after_confirmation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .email("judy@example.com")
            .build()
            .await?,
    );
    let profile = services.profile(db);

    profile
        .request_email_change(&user, " Judy.New@Example.com ", DEFAULT_PASSWORD)
        .await?;

    let sent = services.mail.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "judy.new@example.com");
    assert_eq!(sent[0].subject, "Confirm your email change");
    assert!(sent[0].body.starts_with(
        "Please confirm your email change by clicking the link: https://app.primemarket.test/confirm-email?source=mail&token="
    ));

    let users = UserRepository::new(db);
    assert_eq!(users.find_by_id(user.id).await?.unwrap().email, "judy@example.com");

    let raw = services.mail.last_token().await.unwrap();
    profile.confirm_email_change(&raw).await?;
    assert_eq!(
        users.find_by_id(user.id).await?.unwrap().email,
        "judy.new@example.com"
    );

    profile.confirm_email_change(&raw).await?;

    Ok(())
}

/// Tests the request checks password, sameness and availability.
///
/// Expected: InvalidCredentials, Required, EmailSameAsCurrent and EmailAlreadyInUse
#[tokio::test]
async fn rejects_invalid_email_change_requests() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .email("kim@example.com")
            .build()
            .await?,
    );
    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;
    let profile = services.profile(db);

    let err = profile
        .request_email_change(&user, "new@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::InvalidCredentials));

    let err = profile
        .request_email_change(&user, "new@example.com", " ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Required("Current password")));

    let err = profile
        .request_email_change(&user, "KIM@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::EmailSameAsCurrent));

    let err = profile
        .request_email_change(&user, "taken@example.com", DEFAULT_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::EmailAlreadyInUse));

    assert!(services.mail.sent().await.is_empty());

    Ok(())
}

/// Tests confirmation when another account claimed the address in the meantime.
///
/// Expected: Err(AuthError::EmailAlreadyInUse), email unchanged
#[tokio::test]
async fn rejects_confirmation_when_email_taken_meanwhile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = factory::user::UserFactory::new(db)
        .email("leo@example.com")
        .build()
        .await?;
    factory::email_change_token::EmailChangeTokenFactory::new(db, user.id)
        .token_hash(hash_token("raw-change"))
        .new_email("contested@example.com")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("contested@example.com")
        .build()
        .await?;

    let err = services
        .profile(db)
        .confirm_email_change("raw-change")
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::EmailAlreadyInUse));
    assert_eq!(
        UserRepository::new(db).find_by_id(user.id).await?.unwrap().email,
        "leo@example.com"
    );

    Ok(())
}

/// Tests blank, unknown and expired email change tokens.
///
/// Expected: Required, Invalid and Expired token errors
#[tokio::test]
async fn rejects_bad_email_change_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let user = factory::user::create_user(db).await?;
    factory::email_change_token::EmailChangeTokenFactory::new(db, user.id)
        .token_hash(hash_token("late"))
        .expires_at(Utc::now() - Duration::seconds(5))
        .build()
        .await?;
    let profile = services.profile(db);

    let err = profile.confirm_email_change("").await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Required(TokenKind::EmailChange));

    let err = profile.confirm_email_change("nope").await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Invalid(TokenKind::EmailChange));

    let err = profile.confirm_email_change("late").await.unwrap_err();
    assert_eq!(token_err(err), TokenError::Expired(TokenKind::EmailChange));

    Ok(())
}
