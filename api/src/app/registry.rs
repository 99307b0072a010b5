//! Applicant registry
//!
//! Find-or-create by passport number, resolving concurrent creation races
//! through the store's uniqueness constraint, plus filtered applicant search.

use std::sync::Arc;

use crate::app::validator::Validator;
use crate::domain::entities::{Applicant, NewApplicant};
use crate::domain::pagination::{Page, Pageable};
use crate::domain::ports::{ApplicantFilter, ApplicantRepository};
use crate::error::{AppError, DomainError};

/// Service resolving applicants by their natural key
pub struct ApplicantRegistry<R>
where
    R: ApplicantRepository,
{
    applicants: Arc<R>,
    validator: Validator,
}

impl<R> Clone for ApplicantRegistry<R>
where
    R: ApplicantRepository,
{
    fn clone(&self) -> Self {
        Self {
            applicants: Arc::clone(&self.applicants),
            validator: self.validator.clone(),
        }
    }
}

impl<R> ApplicantRegistry<R>
where
    R: ApplicantRepository,
{
    pub fn new(applicants: Arc<R>, validator: Validator) -> Self {
        Self {
            applicants,
            validator,
        }
    }

    /// Find the applicant stored under the candidate's passport, creating it
    /// when absent.
    ///
    /// When the insert loses a concurrent race on the passport constraint the
    /// winner's record is authoritative: the failure is discarded and the row
    /// is re-read once. There is never a second insert attempt — it would
    /// only race again.
    pub async fn find_or_create(&self, candidate: &NewApplicant) -> Result<Applicant, DomainError> {
        if let Some(existing) = self.applicants.find_by_passport(&candidate.passport).await? {
            return Ok(existing);
        }

        match self.applicants.insert(candidate).await {
            Ok(created) => Ok(created),
            Err(DomainError::UniqueViolation(constraint)) => {
                tracing::debug!(
                    passport = %candidate.passport,
                    %constraint,
                    "lost applicant creation race, re-reading winner"
                );
                self.applicants
                    .find_by_passport(&candidate.passport)
                    .await?
                    .ok_or_else(|| {
                        DomainError::Internal(format!(
                            "applicant with passport {} vanished after a passport conflict",
                            candidate.passport
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }

    /// Paginated applicant search. Present filter fields are validated first
    /// and matched by exact equality, combined by conjunction.
    pub async fn find_page(
        &self,
        pageable: Pageable,
        filter: &ApplicantFilter,
    ) -> Result<Page<Applicant>, AppError> {
        self.validator.validate_filter(filter)?;
        Ok(self.applicants.find_page(pageable, filter).await?)
    }
}
