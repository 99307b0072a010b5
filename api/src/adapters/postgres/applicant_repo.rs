//! PostgreSQL adapter for ApplicantRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::map_db_err;
use crate::domain::entities::{Applicant, ApplicantId, NewApplicant};
use crate::domain::pagination::{clamp_page, Page, Pageable};
use crate::domain::ports::{ApplicantFilter, ApplicantRepository};
use crate::entity::client;
use crate::error::DomainError;

/// PostgreSQL implementation of ApplicantRepository
pub struct PostgresApplicantRepository {
    db: DatabaseConnection,
}

impl PostgresApplicantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicantRepository for PostgresApplicantRepository {
    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError> {
        let result = client::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(to_domain).transpose()
    }

    async fn find_by_passport(&self, passport: &str) -> Result<Option<Applicant>, DomainError> {
        let result = client::Entity::find()
            .filter(client::Column::Passport.eq(passport))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(to_domain).transpose()
    }

    async fn insert(&self, applicant: &NewApplicant) -> Result<Applicant, DomainError> {
        let model = client::ActiveModel {
            first_name: Set(applicant.first_name.clone()),
            last_name: Set(applicant.last_name.clone()),
            middle_name: Set(applicant.middle_name.clone()),
            marital_status: Set(applicant.marital_status.map(|s| s.to_string())),
            passport: Set(applicant.passport.clone()),
            phone: Set(applicant.phone.clone()),
            address: Set(applicant.address.clone()),
            organization_name: Set(applicant.organization_name.clone()),
            position: Set(applicant.position.clone()),
            employment_period_days: Set(applicant.employment_period_days),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(map_db_err)?;

        to_domain(result)
    }

    async fn find_page(
        &self,
        pageable: Pageable,
        filter: &ApplicantFilter,
    ) -> Result<Page<Applicant>, DomainError> {
        let condition = filter_condition(filter);

        let total = client::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        let window = clamp_page(pageable, total);

        let rows = client::Entity::find()
            .filter(condition)
            .order_by_asc(client::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let content = rows
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(window.page, total, content))
    }
}

/// Build the equality conjunction for the present filter fields
fn filter_condition(filter: &ApplicantFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(first_name) = &filter.first_name {
        condition = condition.add(client::Column::FirstName.eq(first_name.clone()));
    }
    if let Some(last_name) = &filter.last_name {
        condition = condition.add(client::Column::LastName.eq(last_name.clone()));
    }
    if let Some(middle_name) = &filter.middle_name {
        condition = condition.add(client::Column::MiddleName.eq(middle_name.clone()));
    }
    if let Some(phone) = &filter.phone {
        condition = condition.add(client::Column::Phone.eq(phone.clone()));
    }
    if let Some(passport) = &filter.passport {
        condition = condition.add(client::Column::Passport.eq(passport.clone()));
    }
    condition
}

/// Convert a SeaORM model to the domain entity
fn to_domain(model: client::Model) -> Result<Applicant, DomainError> {
    let marital_status = model
        .marital_status
        .map(|s| s.parse().map_err(DomainError::Internal))
        .transpose()?;

    Ok(Applicant {
        id: ApplicantId(model.id),
        first_name: model.first_name,
        last_name: model.last_name,
        middle_name: model.middle_name,
        marital_status,
        passport: model.passport,
        phone: model.phone,
        address: model.address,
        organization_name: model.organization_name,
        position: model.position,
        employment_period_days: model.employment_period_days,
    })
}
