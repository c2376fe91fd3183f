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
                    .table(PasswordChangeTokens::Table)
                    .if_not_exists()
                    .col(pk_auto(PasswordChangeTokens::Id))
                    .col(integer(PasswordChangeTokens::UserId))
                    .col(string_len_uniq(PasswordChangeTokens::TokenHash, 64))
                    .col(string(PasswordChangeTokens::NewPasswordHash))
                    .col(timestamp_with_time_zone(PasswordChangeTokens::ExpiresAt))
                    .col(timestamp_with_time_zone_null(PasswordChangeTokens::ConfirmedAt))
                    .col(
                        timestamp_with_time_zone(PasswordChangeTokens::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(PasswordChangeTokens::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_password_change_tokens_user_id")
                            .from(PasswordChangeTokens::Table, PasswordChangeTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PasswordChangeTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PasswordChangeTokens {
    Table,
    Id,
    UserId,
    TokenHash,
    NewPasswordHash,
    ExpiresAt,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}
