pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users_table;
mod m20260110_000002_create_user_accounts_table;
mod m20260110_000003_create_user_account_txs_table;
mod m20260111_000004_create_refresh_tokens_table;
mod m20260111_000005_create_email_verification_tokens_table;
mod m20260114_000006_create_email_change_tokens_table;
mod m20260114_000007_create_password_change_tokens_table;

pub use m20260110_000001_create_users_table::USERNAME_LENGTH_CHECK;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users_table::Migration),
            Box::new(m20260110_000002_create_user_accounts_table::Migration),
            Box::new(m20260110_000003_create_user_account_txs_table::Migration),
            Box::new(m20260111_000004_create_refresh_tokens_table::Migration),
            Box::new(m20260111_000005_create_email_verification_tokens_table::Migration),
            Box::new(m20260114_000006_create_email_change_tokens_table::Migration),
            Box::new(m20260114_000007_create_password_change_tokens_table::Migration),
        ]
    }
}
