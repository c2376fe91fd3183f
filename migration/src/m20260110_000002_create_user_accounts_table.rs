use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccounts::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAccounts::Id))
                    .col(integer(UserAccounts::UserId))
                    .col(string_len(UserAccounts::CurrencyCode, 5))
                    .col(decimal_len(UserAccounts::Balance, 13, 4).default(0))
                    .col(decimal_len(UserAccounts::Reserved, 13, 4).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_accounts_user_id")
                            .from(UserAccounts::Table, UserAccounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_user_accounts_user_currency")
                    .table(UserAccounts::Table)
                    .col(UserAccounts::UserId)
                    .col(UserAccounts::CurrencyCode)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAccounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserAccounts {
    Table,
    Id,
    UserId,
    CurrencyCode,
    Balance,
    Reserved,
}
