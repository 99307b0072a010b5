//! SeaORM model for the `credit_agreement` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credit_agreement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique: the `credit_agreement_credit_application_id_key` constraint
    /// enforces the 1:1 with applications
    #[sea_orm(unique)]
    pub credit_application_id: i64,
    pub signed_at: Option<DateTimeWithTimeZone>,
    pub signing_status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credit_application::Entity",
        from = "Column::CreditApplicationId",
        to = "super::credit_application::Column::Id"
    )]
    CreditApplication,
}

impl Related<super::credit_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditApplication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
