use super::*;

/// Tests email existence is an exact match on the normalized address.
///
/// Expected: true for the stored address, false for others
#[tokio::test]
async fn checks_email_exists() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.email_exists("taken@example.com").await?);
    assert!(!repo.email_exists("free@example.com").await?);

    Ok(())
}

/// Tests username existence ignores case.
///
/// Expected: true for any casing of a stored username
#[tokio::test]
async fn checks_username_exists_ignoring_case() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("Alice")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.username_exists("alice").await?);
    assert!(repo.username_exists("ALICE").await?);
    assert!(!repo.username_exists("alicia").await?);

    Ok(())
}
