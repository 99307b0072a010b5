//! Agreement ledger
//!
//! Owns agreement persistence: the atomic approval commit and idempotent
//! signing. The 1:1 application/agreement constraint lives in the store; a
//! lost creation race surfaces here as a retryable conflict.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::entities::{Agreement, Application, ApplicationId};
use crate::domain::pagination::{Page, Pageable};
use crate::domain::ports::AgreementRepository;
use crate::error::DomainError;

/// Error from the atomic approval commit
#[derive(Debug, Error)]
pub enum CreateAgreementError {
    /// A concurrent evaluation already created the agreement. Retryable: the
    /// caller re-runs the evaluation step, which will observe the winner.
    #[error("agreement already exists for application {0}")]
    Conflict(ApplicationId),

    /// Any other storage failure; fatal.
    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Service owning credit agreement persistence
pub struct AgreementLedger<R>
where
    R: AgreementRepository,
{
    agreements: Arc<R>,
}

impl<R> Clone for AgreementLedger<R>
where
    R: AgreementRepository,
{
    fn clone(&self) -> Self {
        Self {
            agreements: Arc::clone(&self.agreements),
        }
    }
}

impl<R> AgreementLedger<R>
where
    R: AgreementRepository,
{
    pub fn new(agreements: Arc<R>) -> Self {
        Self { agreements }
    }

    /// Commit an approval: the application's APPROVED status, amount and term
    /// become visible together with the new NOT_SIGNED agreement, in one
    /// store transaction.
    pub async fn create(
        &self,
        application: &Application,
        approved_amount: Decimal,
        approved_term: i32,
    ) -> Result<Agreement, CreateAgreementError> {
        match self
            .agreements
            .create(&application.id, approved_amount, approved_term)
            .await
        {
            Ok(agreement) => Ok(agreement),
            Err(DomainError::UniqueViolation(constraint)) => {
                tracing::debug!(
                    application_id = %application.id,
                    %constraint,
                    "lost agreement creation race"
                );
                Err(CreateAgreementError::Conflict(application.id))
            }
            Err(e) => Err(CreateAgreementError::Storage(e)),
        }
    }

    /// Sign an agreement, idempotently.
    ///
    /// An already signed agreement is returned unchanged without touching the
    /// store. Otherwise the store performs a conditional update; concurrent
    /// signers all observe the single winner's row.
    pub async fn sign(
        &self,
        agreement: &Agreement,
        now: DateTime<Utc>,
    ) -> Result<Agreement, DomainError> {
        if agreement.is_signed() {
            return Ok(agreement.clone());
        }
        self.agreements.sign(&agreement.id, now).await
    }

    /// Find the agreement belonging to an application
    pub async fn find_by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<Agreement>, DomainError> {
        self.agreements.find_by_application(application_id).await
    }

    /// Paginated agreement listing
    pub async fn find_page(&self, pageable: Pageable) -> Result<Page<Agreement>, DomainError> {
        self.agreements.find_page(pageable).await
    }
}
