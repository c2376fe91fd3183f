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
                    .table(EmailChangeTokens::Table)
                    .if_not_exists()
                    .col(pk_auto(EmailChangeTokens::Id))
                    .col(integer(EmailChangeTokens::UserId))
                    .col(string_len_uniq(EmailChangeTokens::TokenHash, 64))
                    .col(string_len(EmailChangeTokens::NewEmail, 254))
                    .col(timestamp_with_time_zone(EmailChangeTokens::ExpiresAt))
                    .col(timestamp_with_time_zone_null(EmailChangeTokens::ConfirmedAt))
                    .col(
                        timestamp_with_time_zone(EmailChangeTokens::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(EmailChangeTokens::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_change_tokens_user_id")
                            .from(EmailChangeTokens::Table, EmailChangeTokens::UserId)
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
            .drop_table(Table::drop().table(EmailChangeTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EmailChangeTokens {
    Table,
    Id,
    UserId,
    TokenHash,
    NewEmail,
    ExpiresAt,
    ConfirmedAt,
    CreatedAt,
    UpdatedAt,
}
