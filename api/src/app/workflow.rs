//! Application workflow
//!
//! Orchestrates the public operations: submitting a credit application
//! (intake, dedup, mismatch check, evaluation) and signing its agreement,
//! plus the paginated listings.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::app::approval::{ApprovalEngine, EvaluationError};
use crate::app::ledger::AgreementLedger;
use crate::app::registry::ApplicantRegistry;
use crate::app::validator::Validator;
use crate::domain::entities::{
    Agreement, ApplicationId, ApplicationRecord, ApplicationStatus, NewApplicant, NewApplication,
};
use crate::domain::pagination::{Page, Pageable};
use crate::domain::ports::{AgreementRepository, ApplicantRepository, ApplicationRepository};
use crate::error::AppError;

/// Service implementing the credit application lifecycle
pub struct ApplicationWorkflow<CR, AR, GR>
where
    CR: ApplicantRepository,
    AR: ApplicationRepository,
    GR: AgreementRepository,
{
    validator: Validator,
    registry: ApplicantRegistry<CR>,
    engine: ApprovalEngine<AR, GR>,
    ledger: AgreementLedger<GR>,
    applications: Arc<AR>,
    page_size: u64,
    /// Ceiling for the evaluation retry loop; only the agreement creation
    /// conflict is ever retried
    max_evaluation_attempts: u32,
}

impl<CR, AR, GR> ApplicationWorkflow<CR, AR, GR>
where
    CR: ApplicantRepository,
    AR: ApplicationRepository,
    GR: AgreementRepository,
{
    pub fn new(
        validator: Validator,
        registry: ApplicantRegistry<CR>,
        engine: ApprovalEngine<AR, GR>,
        ledger: AgreementLedger<GR>,
        applications: Arc<AR>,
        page_size: u64,
        max_evaluation_attempts: u32,
    ) -> Self {
        Self {
            validator,
            registry,
            engine,
            ledger,
            applications,
            page_size,
            max_evaluation_attempts,
        }
    }

    /// Submit a credit application.
    ///
    /// Field and mismatch failures are detected before any application row is
    /// written. The evaluation step runs right after the PENDING insert and
    /// the returned projection reflects the post-evaluation state.
    pub async fn submit(
        &self,
        applicant: NewApplicant,
        amount: Decimal,
    ) -> Result<ApplicationRecord, AppError> {
        self.validator.validate_submission(&applicant, amount)?;

        let stored = self.registry.find_or_create(&applicant).await?;
        if !stored.matches(&applicant) {
            tracing::warn!(
                applicant_id = %stored.id,
                "submission conflicts with stored applicant data"
            );
            return Err(AppError::ClientInfoMismatch);
        }

        let application = self
            .applications
            .insert(&NewApplication {
                applicant_id: stored.id,
                requested_amount: amount,
            })
            .await?;
        tracing::info!(
            application_id = %application.id,
            applicant_id = %stored.id,
            "credit application received"
        );

        self.evaluate_with_retry(&application.id).await?;

        self.applications
            .find_by_id(&application.id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "credit application {} vanished after evaluation",
                    application.id
                ))
            })
    }

    /// Run the evaluation step, retrying only on the agreement creation
    /// conflict, up to the configured attempt ceiling.
    async fn evaluate_with_retry(&self, id: &ApplicationId) -> Result<(), AppError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.engine.evaluate(id).await {
                Ok(_) => return Ok(()),
                Err(EvaluationError::Conflict(_)) if attempt < self.max_evaluation_attempts => {
                    tracing::debug!(
                        application_id = %id,
                        attempt,
                        "retrying evaluation after agreement conflict"
                    );
                }
                Err(EvaluationError::Conflict(id)) => {
                    return Err(AppError::Internal(format!(
                        "agreement creation conflict for application {} persisted after {} attempts",
                        id, attempt
                    )));
                }
                Err(EvaluationError::Storage(e)) => return Err(e.into()),
            }
        }
    }

    /// Sign the agreement of an approved application. Idempotent: repeated
    /// calls return the same signed agreement.
    pub async fn sign(&self, application_id: ApplicationId) -> Result<Agreement, AppError> {
        let record = self
            .applications
            .find_by_id(&application_id)
            .await?
            .ok_or(AppError::ApplicationNotFound(application_id))?;

        match record.application.status {
            ApplicationStatus::Pending => {
                return Err(AppError::PendingDuringSigning(application_id))
            }
            ApplicationStatus::Rejected => {
                return Err(AppError::RejectedDuringSigning(application_id))
            }
            ApplicationStatus::Approved => {}
        }

        // An approved application always has an agreement; its absence means
        // a broken invariant, not a client error.
        let agreement = self
            .ledger
            .find_by_application(&application_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "approved application {} has no agreement",
                    application_id
                ))
            })?;

        let signed = self.ledger.sign(&agreement, Utc::now()).await?;
        tracing::info!(
            application_id = %application_id,
            agreement_id = %signed.id,
            "credit agreement signed"
        );
        Ok(signed)
    }

    /// Paginated application listing
    pub async fn list_applications(
        &self,
        page: u64,
    ) -> Result<Page<ApplicationRecord>, AppError> {
        Ok(self
            .applications
            .find_page(Pageable::new(page, self.page_size))
            .await?)
    }

    /// Paginated agreement listing
    pub async fn list_agreements(&self, page: u64) -> Result<Page<Agreement>, AppError> {
        Ok(self
            .ledger
            .find_page(Pageable::new(page, self.page_size))
            .await?)
    }
}
