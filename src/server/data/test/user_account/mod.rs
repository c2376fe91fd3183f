use crate::server::data::user_account::UserAccountRepository;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

/// Tests accounts are returned for the owner only, ordered by currency.
///
/// Expected: the user's two accounts in alphabetical currency order
#[tokio::test]
async fn gets_accounts_by_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    factory::user_account::UserAccountFactory::new(db, user.id, "USD")
        .balance(Decimal::new(15025, 2))
        .reserved(Decimal::new(25, 0))
        .build()
        .await?;
    factory::create_account(db, user.id, "EUR").await?;
    factory::create_account(db, other.id, "GBP").await?;

    let repo = UserAccountRepository::new(db);
    let accounts = repo.get_by_user(user.id, None).await?;

    let currencies: Vec<_> = accounts.iter().map(|a| a.currency_code.as_str()).collect();
    assert_eq!(currencies, vec!["EUR", "USD"]);
    assert_eq!(accounts[1].balance, Decimal::new(15025, 2));
    assert_eq!(accounts[1].reserved, Decimal::new(25, 0));

    Ok(())
}

/// Tests the optional currency filter.
///
/// Expected: only the matching account
#[tokio::test]
async fn filters_accounts_by_currency() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    factory::create_account(db, user.id, "USD").await?;
    factory::create_account(db, user.id, "EUR").await?;

    let repo = UserAccountRepository::new(db);
    let accounts = repo.get_by_user(user.id, Some("EUR")).await?;

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].currency_code, "EUR");

    Ok(())
}
