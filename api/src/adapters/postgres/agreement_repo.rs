//! PostgreSQL adapter for AgreementRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::map_db_err;
use crate::domain::entities::{
    Agreement, AgreementId, ApplicationId, ApplicationStatus, SigningStatus,
};
use crate::domain::pagination::{clamp_page, Page, Pageable};
use crate::domain::ports::AgreementRepository;
use crate::entity::{credit_agreement, credit_application};
use crate::error::DomainError;

/// PostgreSQL implementation of AgreementRepository
pub struct PostgresAgreementRepository {
    db: DatabaseConnection,
}

impl PostgresAgreementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AgreementRepository for PostgresAgreementRepository {
    async fn create(
        &self,
        application_id: &ApplicationId,
        approved_amount: Decimal,
        approved_term: i32,
    ) -> Result<Agreement, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        // Insert first: the unique constraint on credit_application_id aborts
        // the transaction before the application row is touched when a
        // concurrent evaluation already committed.
        let agreement = credit_agreement::ActiveModel {
            credit_application_id: Set(application_id.0),
            signed_at: Set(None),
            signing_status: Set(SigningStatus::NotSigned.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        credit_application::ActiveModel {
            id: Set(application_id.0),
            status: Set(ApplicationStatus::Approved.to_string()),
            approved_amount: Set(Some(approved_amount)),
            approved_term: Set(Some(approved_term)),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        to_domain(agreement)
    }

    async fn find_by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<Agreement>, DomainError> {
        let result = credit_agreement::Entity::find()
            .filter(credit_agreement::Column::CreditApplicationId.eq(application_id.0))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(to_domain).transpose()
    }

    async fn sign(
        &self,
        id: &AgreementId,
        signed_at: DateTime<Utc>,
    ) -> Result<Agreement, DomainError> {
        // Conditional update: only a NOT_SIGNED row is written, so concurrent
        // signers collapse to a single winner at the store.
        credit_agreement::Entity::update_many()
            .col_expr(
                credit_agreement::Column::SigningStatus,
                Expr::value(SigningStatus::Signed.to_string()),
            )
            .col_expr(
                credit_agreement::Column::SignedAt,
                Expr::value(Some(signed_at.fixed_offset())),
            )
            .filter(credit_agreement::Column::Id.eq(id.0))
            .filter(
                credit_agreement::Column::SigningStatus
                    .eq(SigningStatus::NotSigned.to_string()),
            )
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        // Whoever performed the write, the stored row is the answer.
        let stored = credit_agreement::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("credit agreement {}", id)))?;

        to_domain(stored)
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<Agreement>, DomainError> {
        let total = credit_agreement::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        let window = clamp_page(pageable, total);

        let rows = credit_agreement::Entity::find()
            .order_by_asc(credit_agreement::Column::Id)
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

/// Convert a SeaORM model to the domain entity
fn to_domain(model: credit_agreement::Model) -> Result<Agreement, DomainError> {
    let signing_status = model
        .signing_status
        .parse::<SigningStatus>()
        .map_err(DomainError::Internal)?;

    Ok(Agreement {
        id: AgreementId(model.id),
        application_id: ApplicationId(model.credit_application_id),
        signed_at: model.signed_at.map(|dt| dt.with_timezone(&Utc)),
        signing_status,
    })
}
