//! SeaORM model for the `credit_application` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credit_application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub client_id: i64,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub requested_amount: Decimal,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub approved_amount: Option<Decimal>,
    pub approved_term: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(has_one = "super::credit_agreement::Entity")]
    CreditAgreement,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::credit_agreement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditAgreement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
