//! SeaORM model for the `client` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub marital_status: Option<String>,
    /// Unique natural key; the `client_passport_key` constraint arbitrates
    /// concurrent creation
    #[sea_orm(unique)]
    pub passport: String,
    pub phone: String,
    pub address: Option<String>,
    pub organization_name: String,
    pub position: String,
    pub employment_period_days: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::credit_application::Entity")]
    CreditApplication,
}

impl Related<super::credit_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditApplication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
