//! PostgreSQL adapter for ApplicationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

use super::map_db_err;
use crate::domain::entities::{
    AgreementId, ApplicantId, Application, ApplicationId, ApplicationRecord, ApplicationStatus,
    NewApplication,
};
use crate::domain::pagination::{clamp_page, Page, Pageable};
use crate::domain::ports::ApplicationRepository;
use crate::entity::{credit_agreement, credit_application};
use crate::error::DomainError;

/// PostgreSQL implementation of ApplicationRepository
pub struct PostgresApplicationRepository {
    db: DatabaseConnection,
}

impl PostgresApplicationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<Application, DomainError> {
        let model = credit_application::ActiveModel {
            client_id: Set(application.applicant_id.0),
            requested_amount: Set(application.requested_amount),
            status: Set(ApplicationStatus::Pending.to_string()),
            approved_amount: Set(None),
            approved_term: Set(None),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(map_db_err)?;

        to_domain(result)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, DomainError> {
        let result = credit_application::Entity::find_by_id(id.0)
            .find_also_related(credit_agreement::Entity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result
            .map(|(application, agreement)| to_record(application, agreement))
            .transpose()
    }

    async fn record_rejection(&self, id: &ApplicationId) -> Result<(), DomainError> {
        credit_application::ActiveModel {
            id: Set(id.0),
            status: Set(ApplicationStatus::Rejected.to_string()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<ApplicationRecord>, DomainError> {
        let total = credit_application::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        let window = clamp_page(pageable, total);

        let rows = credit_application::Entity::find()
            .find_also_related(credit_agreement::Entity)
            .order_by_asc(credit_application::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let content = rows
            .into_iter()
            .map(|(application, agreement)| to_record(application, agreement))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(window.page, total, content))
    }
}

/// Convert a SeaORM model to the domain entity
fn to_domain(model: credit_application::Model) -> Result<Application, DomainError> {
    let status = model
        .status
        .parse::<ApplicationStatus>()
        .map_err(DomainError::Internal)?;

    Ok(Application {
        id: ApplicationId(model.id),
        applicant_id: ApplicantId(model.client_id),
        requested_amount: model.requested_amount,
        status,
        approved_amount: model.approved_amount,
        approved_term: model.approved_term,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn to_record(
    application: credit_application::Model,
    agreement: Option<credit_agreement::Model>,
) -> Result<ApplicationRecord, DomainError> {
    Ok(ApplicationRecord {
        application: to_domain(application)?,
        agreement_id: agreement.map(|m| AgreementId(m.id)),
    })
}
