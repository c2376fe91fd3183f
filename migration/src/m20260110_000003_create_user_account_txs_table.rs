use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000002_create_user_accounts_table::UserAccounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccountTxs::Table)
                    .if_not_exists()
                    .col(pk_auto(UserAccountTxs::Id))
                    .col(uuid_uniq(UserAccountTxs::PublicId))
                    .col(integer(UserAccountTxs::UserAccountId))
                    .col(decimal_len(UserAccountTxs::Amount, 13, 4))
                    .col(string(UserAccountTxs::Type))
                    .col(string(UserAccountTxs::RefType))
                    .col(big_integer(UserAccountTxs::RefId))
                    .col(
                        timestamp_with_time_zone(UserAccountTxs::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_account_txs_user_account_id")
                            .from(UserAccountTxs::Table, UserAccountTxs::UserAccountId)
                            .to(UserAccounts::Table, UserAccounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_user_account_txs_account_created_at")
                    .table(UserAccountTxs::Table)
                    .col(UserAccountTxs::UserAccountId)
                    .col(UserAccountTxs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserAccountTxs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserAccountTxs {
    Table,
    Id,
    PublicId,
    UserAccountId,
    Amount,
    Type,
    RefType,
    RefId,
    CreatedAt,
}
