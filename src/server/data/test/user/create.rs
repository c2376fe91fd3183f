use super::*;

fn param(username: &str, email: &str) -> CreateUserParam {
    CreateUserParam {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        is_active: false,
    }
}

/// Tests creating a user stores every field.
///
/// Expected: Ok(User) with the given values and a generated ID
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(param("alice", "alice@example.com")).await?;

    assert!(user.id > 0);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.password_hash, "hash");
    assert!(!user.is_active);

    Ok(())
}

/// Tests the unique email constraint surfaces as a unique violation.
///
/// Expected: Err(DbErr) classified as `UniqueConstraintViolation`
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(param("alice", "alice@example.com")).await?;

    let result = repo.create(param("bob", "alice@example.com")).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}

/// Tests a duplicate username maps to the username conflict.
///
/// Expected: `AuthError::UsernameAlreadyInUse`
#[tokio::test]
async fn maps_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(param("alice", "alice@example.com")).await?;

    let err = repo
        .create(param("alice", "other@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::UsernameAlreadyInUse));

    Ok(())
}

/// Tests a duplicate email maps to the email conflict.
///
/// Expected: `AuthError::EmailAlreadyInUse`
#[tokio::test]
async fn maps_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(param("alice", "alice@example.com")).await?;

    let err = repo
        .create(param("bob", "alice@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::EmailAlreadyInUse));

    Ok(())
}

/// Tests the migrated schema treats usernames differing only in case as duplicates.
///
/// Expected: second insert fails and maps to `AuthError::UsernameAlreadyInUse`
#[tokio::test]
async fn migrated_schema_rejects_username_case_variant() -> Result<(), DbErr> {
    let db = migrated_db().await;

    let repo = UserRepository::new(&db);
    repo.create(param("Alice", "alice@example.com")).await?;

    let err = repo
        .create(param("alice", "other@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::UsernameAlreadyInUse));

    Ok(())
}

/// Tests the migrated schema enforces the minimum username length.
///
/// Expected: insert of a two character username maps to `AuthError::UsernameTooShort(3)`
#[tokio::test]
async fn migrated_schema_rejects_short_username() -> Result<(), DbErr> {
    let db = migrated_db().await;

    let repo = UserRepository::new(&db);
    let err = repo
        .create(param("ab", "ab@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(auth_err(err), AuthError::UsernameTooShort(3)));

    repo.create(param("abc", "abc@example.com")).await?;

    Ok(())
}
