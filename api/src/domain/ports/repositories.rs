//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! The store, not application code, enforces the two uniqueness constraints
//! this workflow depends on: `client.passport` and
//! `credit_agreement.credit_application_id`. Implementations must surface a
//! violated constraint as `DomainError::UniqueViolation` so callers can
//! branch on it without inspecting storage internals.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{
    Agreement, AgreementId, Applicant, ApplicantId, Application, ApplicationId, ApplicationRecord,
    NewApplicant, NewApplication,
};
use crate::domain::pagination::{Page, Pageable};
use crate::error::DomainError;

/// Optional-field equality filter for applicant search. Present fields are
/// combined by conjunction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub passport: Option<String>,
}

impl ApplicantFilter {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.middle_name.is_none()
            && self.phone.is_none()
            && self.passport.is_none()
    }
}

/// Repository for Applicant entities
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// Find an applicant by id
    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError>;

    /// Find an applicant by passport number
    async fn find_by_passport(&self, passport: &str) -> Result<Option<Applicant>, DomainError>;

    /// Insert a new applicant. Fails with `UniqueViolation` when the passport
    /// is already stored.
    async fn insert(&self, applicant: &NewApplicant) -> Result<Applicant, DomainError>;

    /// Filtered, paginated applicant listing ordered by id
    async fn find_page(
        &self,
        pageable: Pageable,
        filter: &ApplicantFilter,
    ) -> Result<Page<Applicant>, DomainError>;
}

/// Repository for Application entities
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Insert a new application as PENDING with a store-assigned creation
    /// timestamp
    async fn insert(&self, application: &NewApplication) -> Result<Application, DomainError>;

    /// Find an application together with its agreement id, when one exists
    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, DomainError>;

    /// Mark a pending application REJECTED. The approved fields stay null and
    /// no agreement is involved.
    async fn record_rejection(&self, id: &ApplicationId) -> Result<(), DomainError>;

    /// Paginated application listing ordered by id
    async fn find_page(&self, pageable: Pageable) -> Result<Page<ApplicationRecord>, DomainError>;
}

/// Repository for Agreement entities
#[async_trait]
pub trait AgreementRepository: Send + Sync {
    /// Record an approval: set the application APPROVED with the given amount
    /// and term, and insert its NOT_SIGNED agreement — all in one store
    /// transaction, so the approved status is never visible without its
    /// agreement. Fails with `UniqueViolation` when an agreement for the
    /// application already exists.
    async fn create(
        &self,
        application_id: &ApplicationId,
        approved_amount: Decimal,
        approved_term: i32,
    ) -> Result<Agreement, DomainError>;

    /// Find the agreement belonging to an application
    async fn find_by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<Agreement>, DomainError>;

    /// Sign an agreement if it is still NOT_SIGNED and return the stored row.
    ///
    /// The write is conditional on the current status, serialized by the
    /// store: under concurrent signs exactly one caller performs the update
    /// and every caller observes the same signed row and timestamp.
    async fn sign(
        &self,
        id: &AgreementId,
        signed_at: DateTime<Utc>,
    ) -> Result<Agreement, DomainError>;

    /// Paginated agreement listing ordered by id
    async fn find_page(&self, pageable: Pageable) -> Result<Page<Agreement>, DomainError>;
}
