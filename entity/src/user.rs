use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(24))")]
    pub username: String,
    #[sea_orm(unique, column_type = "String(StringLen::N(254))")]
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_account::Entity")]
    UserAccount,
    #[sea_orm(has_many = "super::refresh_token::Entity")]
    RefreshToken,
    #[sea_orm(has_many = "super::email_verification_token::Entity")]
    EmailVerificationToken,
    #[sea_orm(has_many = "super::email_change_token::Entity")]
    EmailChangeToken,
    #[sea_orm(has_many = "super::password_change_token::Entity")]
    PasswordChangeToken,
}

impl Related<super::user_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccount.def()
    }
}

impl Related<super::refresh_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshToken.def()
    }
}

impl Related<super::email_verification_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailVerificationToken.def()
    }
}

impl Related<super::email_change_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailChangeToken.def()
    }
}

impl Related<super::password_change_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PasswordChangeToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
