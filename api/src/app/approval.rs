//! Approval engine
//!
//! Evaluates a pending application exactly once: an approve/reject decision
//! from a pluggable strategy, the approved amount and term, and the agreement
//! commit through the ledger.

use std::sync::Arc;

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::app::ledger::{AgreementLedger, CreateAgreementError};
use crate::domain::entities::{Agreement, ApplicationId, ApplicationStatus};
use crate::domain::ports::{AgreementRepository, ApplicationRepository};
use crate::error::DomainError;

/// Shortest term, in days, an approval may carry
pub const MIN_TERM_DAYS: i32 = 30;
/// Longest term, in days, an approval may carry
pub const MAX_TERM_DAYS: i32 = 365;

/// Approved amount: 90% of the requested amount, at 2 decimal places.
pub fn approved_amount(requested: Decimal) -> Decimal {
    (requested * Decimal::new(9, 1)).round_dp(2)
}

/// Approve/reject decision seam.
///
/// An explicit strategy parameter keeps the engine free of incidental state
/// and lets tests force either outcome.
pub trait DecisionStrategy: Send + Sync {
    /// Approve or reject a pending application
    fn approve(&self) -> bool;

    /// Term in days for an approved application, within
    /// [`MIN_TERM_DAYS`, `MAX_TERM_DAYS`]
    fn term_days(&self) -> i32;
}

/// Default strategy: a coin flip and a uniform term draw
pub struct RandomDecision;

impl DecisionStrategy for RandomDecision {
    fn approve(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }

    fn term_days(&self) -> i32 {
        rand::thread_rng().gen_range(MIN_TERM_DAYS..=MAX_TERM_DAYS)
    }
}

/// Outcome of one evaluation call
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The application was not PENDING, or already has an agreement;
    /// nothing was written.
    Skipped,
    Approved(Agreement),
    Rejected,
}

/// Error from the evaluation step
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// Lost the agreement creation race; the evaluation step may be retried.
    #[error("agreement creation conflict for application {0}")]
    Conflict(ApplicationId),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// Service deciding the fate of pending applications
pub struct ApprovalEngine<AR, GR>
where
    AR: ApplicationRepository,
    GR: AgreementRepository,
{
    applications: Arc<AR>,
    ledger: AgreementLedger<GR>,
    decision: Arc<dyn DecisionStrategy>,
}

impl<AR, GR> ApprovalEngine<AR, GR>
where
    AR: ApplicationRepository,
    GR: AgreementRepository,
{
    pub fn new(
        applications: Arc<AR>,
        ledger: AgreementLedger<GR>,
        decision: Arc<dyn DecisionStrategy>,
    ) -> Self {
        Self {
            applications,
            ledger,
            decision,
        }
    }

    /// Evaluate a pending application.
    ///
    /// Idempotent against re-invocation: an application that is no longer
    /// PENDING, or that already carries an agreement, is skipped without a
    /// write.
    pub async fn evaluate(&self, id: &ApplicationId) -> Result<Evaluation, EvaluationError> {
        let record = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("credit application {}", id)))?;

        if record.application.status != ApplicationStatus::Pending
            || record.agreement_id.is_some()
        {
            return Ok(Evaluation::Skipped);
        }

        if !self.decision.approve() {
            self.applications.record_rejection(id).await?;
            tracing::info!(application_id = %id, "credit application rejected");
            return Ok(Evaluation::Rejected);
        }

        let amount = approved_amount(record.application.requested_amount);
        let term = self.decision.term_days();

        match self.ledger.create(&record.application, amount, term).await {
            Ok(agreement) => {
                tracing::info!(
                    application_id = %id,
                    approved_amount = %amount,
                    approved_term = term,
                    "credit application approved"
                );
                Ok(Evaluation::Approved(agreement))
            }
            Err(CreateAgreementError::Conflict(id)) => Err(EvaluationError::Conflict(id)),
            Err(CreateAgreementError::Storage(e)) => Err(EvaluationError::Storage(e)),
        }
    }
}
