use super::*;

/// Tests registration with verification required.
///
/// Verifies the user is stored inactive with normalized values and that exactly one
/// verification mail with a working link is sent to the normalized address.
///
/// Expected: Ok(VerificationRequired), inactive user, one mail
#[tokio::test]
async fn registers_inactive_user_and_mails_link() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    let outcome = services
        .auth(db)
        .register(register_param("  Alice ", " Alice@Example.COM "))
        .await?;

    assert_eq!(outcome, RegistrationOutcome::VerificationRequired);

    let user = UserRepository::new(db)
        .find_by_email("alice@example.com")
        .await?
        .unwrap();
    assert_eq!(user.username, "Alice");
    assert!(!user.is_active);
    assert_ne!(user.password_hash, "s3cret-pass");

    let sent = services.mail.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].subject, "Confirm your email");
    assert!(sent[0]
        .body
        .starts_with("Please confirm your email by clicking the link: https://app.primemarket.test/verify-email?token="));
    assert!(services.mail.last_token().await.is_some());

    Ok(())
}

/// Tests registration when verification is disabled.
///
/// Expected: Ok(Registered), active user, no mail
#[tokio::test]
async fn registers_active_user_without_verification() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mut config = Config::for_tests();
    config.email.verification_required = false;
    let services = Services::with_config(config);

    let outcome = services
        .auth(db)
        .register(register_param("bob", "bob@example.com"))
        .await?;

    assert_eq!(outcome, RegistrationOutcome::Registered);
    let user = UserRepository::new(db)
        .find_by_email("bob@example.com")
        .await?
        .unwrap();
    assert!(user.is_active);
    assert!(services.mail.sent().await.is_empty());

    Ok(())
}

/// Tests duplicate email detection ignores case.
///
/// Expected: Err(AuthError::EmailAlreadyInUse)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let err = services
        .auth(db)
        .register(register_param("newcomer", "TAKEN@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::EmailAlreadyInUse));
    assert!(services.mail.sent().await.is_empty());

    Ok(())
}

/// Tests duplicate username detection ignores case.
///
/// Expected: Err(AuthError::UsernameAlreadyInUse)
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();

    factory::user::UserFactory::new(db)
        .username("Trader")
        .build()
        .await?;

    let err = services
        .auth(db)
        .register(register_param("trader", "fresh@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::UsernameAlreadyInUse));

    Ok(())
}

/// Tests blank and out-of-range input.
///
/// Expected: Required for blank fields, UsernameTooShort for two characters
#[tokio::test]
async fn rejects_invalid_input() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();
    let auth = services.auth(db);

    let err = auth
        .register(register_param("   ", "a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Required("Username")));

    let mut blank_password = register_param("carol", "c@example.com");
    blank_password.password = " ".to_string();
    let err = auth.register(blank_password).await.unwrap_err();
    assert!(matches!(err, AppError::Required("Password")));

    let err = auth
        .register(register_param("ab", "ab@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(auth_err(err), AuthError::UsernameTooShort(3)));

    Ok(())
}

/// Tests a failed verification mail rolls the registration back.
///
/// Expected: Err(InternalErr), no user stored
#[tokio::test]
async fn rolls_back_when_mail_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let services = Services::new();
    services.mail.set_failing(true);

    let err = services
        .auth(db)
        .register(register_param("dave", "dave@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InternalErr(_)));
    assert!(!UserRepository::new(db).email_exists("dave@example.com").await?);

    Ok(())
}
