use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(5))")]
    pub currency_code: String,
    #[sea_orm(column_type = "Decimal(Some((13, 4)))")]
    pub balance: Decimal,
    #[sea_orm(column_type = "Decimal(Some((13, 4)))")]
    pub reserved: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::user_account_tx::Entity")]
    UserAccountTx,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::user_account_tx::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserAccountTx.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
