use super::*;

/// Tests finding an existing user by ID and by email.
///
/// Expected: Ok(Some(User)) with matching data
#[tokio::test]
async fn finds_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .username("carol")
        .email("carol@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let by_id = repo.find_by_id(created.id).await?.unwrap();
    assert_eq!(by_id.username, "carol");

    let by_email = repo.find_by_email("carol@example.com").await?.unwrap();
    assert_eq!(by_email.id, created.id);

    Ok(())
}

/// Tests querying for a non-existent user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.find_by_id(999_999).await?.is_none());
    assert!(repo.find_by_email("nobody@example.com").await?.is_none());

    Ok(())
}
