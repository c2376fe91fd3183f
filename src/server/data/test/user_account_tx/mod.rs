use crate::server::{data::user_account_tx::UserAccountTxRepository, model::wallet::WalletTxFilter};
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DbErr;
use std::collections::HashMap;
use test_utils::{builder::TestBuilder, factory};

/// Tests transactions are returned newest first with their currency and totals.
///
/// Expected: 3 items over 2 pages of size 2, page 0 holds the two newest
#[tokio::test]
async fn paginates_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, account) =
        factory::helpers::create_user_with_account(db, "USD", Decimal::new(100, 0)).await?;
    let base = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    for days in 0..3 {
        factory::user_account_tx::UserAccountTxFactory::new(db, account.id)
            .amount(Decimal::new(days + 1, 0))
            .created_at(base + Duration::days(days))
            .build()
            .await?;
    }

    let accounts = HashMap::from([(account.id, "USD".to_string())]);
    let repo = UserAccountTxRepository::new(db);

    let (txs, total_items, total_pages) = repo
        .get_paginated(&accounts, &WalletTxFilter::default(), 0, 2)
        .await?;

    assert_eq!(total_items, 3);
    assert_eq!(total_pages, 2);
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount, Decimal::new(3, 0));
    assert_eq!(txs[1].amount, Decimal::new(2, 0));
    assert_eq!(txs[0].currency, "USD");

    let (last_page, _, _) = repo
        .get_paginated(&accounts, &WalletTxFilter::default(), 1, 2)
        .await?;
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].amount, Decimal::new(1, 0));

    Ok(())
}

/// Tests type and inclusive time range filters.
///
/// Expected: only the DEPOSIT inside [from, to]
#[tokio::test]
async fn filters_by_type_and_time_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, account) =
        factory::helpers::create_user_with_account(db, "EUR", Decimal::new(100, 0)).await?;
    let base = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

    let inside = factory::user_account_tx::UserAccountTxFactory::new(db, account.id)
        .tx_type("DEPOSIT")
        .created_at(base)
        .build()
        .await?;
    factory::user_account_tx::UserAccountTxFactory::new(db, account.id)
        .tx_type("WITHDRAWAL")
        .created_at(base)
        .build()
        .await?;
    factory::user_account_tx::UserAccountTxFactory::new(db, account.id)
        .tx_type("DEPOSIT")
        .created_at(base + Duration::days(5))
        .build()
        .await?;

    let accounts = HashMap::from([(account.id, "EUR".to_string())]);
    let filter = WalletTxFilter {
        currency: None,
        tx_type: Some("DEPOSIT".to_string()),
        from: Some(base),
        to: Some(base + Duration::days(1)),
    };

    let repo = UserAccountTxRepository::new(db);
    let (txs, total_items, _) = repo.get_paginated(&accounts, &filter, 0, 20).await?;

    assert_eq!(total_items, 1);
    assert_eq!(txs[0].public_id, inside.public_id);
    assert_eq!(txs[0].tx_type, "DEPOSIT");

    Ok(())
}

/// Tests no accounts means no query and an empty page.
///
/// Expected: empty page with zero totals
#[tokio::test]
async fn returns_empty_page_without_accounts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserAccountTxRepository::new(db);
    let (txs, total_items, total_pages) = repo
        .get_paginated(&HashMap::new(), &WalletTxFilter::default(), 0, 20)
        .await?;

    assert!(txs.is_empty());
    assert_eq!(total_items, 0);
    assert_eq!(total_pages, 0);

    Ok(())
}

/// Tests a page past the last one, including one whose offset would overflow.
///
/// Expected: no items with the real totals for page 5 and for `u64::MAX`
#[tokio::test]
async fn returns_empty_page_past_the_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, account) =
        factory::helpers::create_user_with_account(db, "USD", Decimal::new(100, 0)).await?;
    factory::create_tx(db, account.id).await?;

    let accounts = HashMap::from([(account.id, "USD".to_string())]);
    let repo = UserAccountTxRepository::new(db);

    for page in [5, u64::MAX] {
        let (txs, total_items, total_pages) = repo
            .get_paginated(&accounts, &WalletTxFilter::default(), page, 100)
            .await?;

        assert!(txs.is_empty());
        assert_eq!(total_items, 1);
        assert_eq!(total_pages, 1);
    }

    Ok(())
}
