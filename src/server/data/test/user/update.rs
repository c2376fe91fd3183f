use super::*;

/// Tests activation flips only the target user.
///
/// Expected: target active, other user unchanged
#[tokio::test]
async fn activates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let target = factory::user::create_inactive_user(db).await?;
    let other = factory::user::create_inactive_user(db).await?;

    let repo = UserRepository::new(db);
    repo.activate(target.id).await?;

    assert!(repo.find_by_id(target.id).await?.unwrap().is_active);
    assert!(!repo.find_by_id(other.id).await?.unwrap().is_active);

    Ok(())
}

/// Tests email and password hash updates.
///
/// Expected: both columns replaced
#[tokio::test]
async fn updates_email_and_password_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = UserRepository::new(db);
    repo.update_email(user.id, "renamed@example.com").await?;
    repo.update_password_hash(user.id, "new-hash").await?;

    let updated = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(updated.email, "renamed@example.com");
    assert_eq!(updated.password_hash, "new-hash");

    Ok(())
}
