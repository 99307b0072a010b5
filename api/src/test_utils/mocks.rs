//! Mock implementations of port traits
//!
//! In-memory repositories backed by one shared store. A single lock stands in
//! for the database's transactions, so multi-row operations (the approval
//! commit) stay atomic and the uniqueness constraints behave exactly like
//! their SQL counterparts — including under concurrent access.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::app::approval::DecisionStrategy;
use crate::domain::entities::{
    Agreement, AgreementId, Applicant, ApplicantId, Application, ApplicationId, ApplicationRecord,
    ApplicationStatus, NewApplicant, NewApplication, SigningStatus,
};
use crate::domain::pagination::{clamp_page, Page, Pageable};
use crate::domain::ports::{
    AgreementRepository, ApplicantFilter, ApplicantRepository, ApplicationRepository,
};
use crate::error::DomainError;

// ============================================================================
// Shared In-Memory Store
// ============================================================================

#[derive(Default)]
struct StoreInner {
    applicants: BTreeMap<i64, Applicant>,
    passport_index: HashMap<String, i64>,
    applications: BTreeMap<i64, Application>,
    agreements: BTreeMap<i64, Agreement>,
    /// application id -> agreement id; enforces the 1:1 constraint
    agreement_index: HashMap<i64, i64>,
    next_applicant_id: i64,
    next_application_id: i64,
    next_agreement_id: i64,
    /// Number of times a sign actually wrote; idempotence tests assert on it
    sign_writes: u64,
}

/// The in-memory stand-in for the transactional database, shared by the three
/// repository mocks.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicant_count(&self) -> usize {
        self.inner.read().unwrap().applicants.len()
    }

    pub fn application_count(&self) -> usize {
        self.inner.read().unwrap().applications.len()
    }

    pub fn agreement_count(&self) -> usize {
        self.inner.read().unwrap().agreements.len()
    }

    pub fn sign_write_count(&self) -> u64 {
        self.inner.read().unwrap().sign_writes
    }

    pub fn application_record(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        let inner = self.inner.read().unwrap();
        inner.applications.get(&id.0).map(|application| {
            let agreement_id = inner.agreement_index.get(&id.0).copied().map(AgreementId);
            ApplicationRecord {
                application: application.clone(),
                agreement_id,
            }
        })
    }

    /// Pre-populate an applicant, bypassing the registry
    pub fn seed_applicant(&self, candidate: &NewApplicant) -> Applicant {
        let mut inner = self.inner.write().unwrap();
        inner.next_applicant_id += 1;
        let applicant = Applicant {
            id: ApplicantId(inner.next_applicant_id),
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            middle_name: candidate.middle_name.clone(),
            marital_status: candidate.marital_status,
            passport: candidate.passport.clone(),
            phone: candidate.phone.clone(),
            address: candidate.address.clone(),
            organization_name: candidate.organization_name.clone(),
            position: candidate.position.clone(),
            employment_period_days: candidate.employment_period_days,
        };
        inner
            .passport_index
            .insert(applicant.passport.clone(), applicant.id.0);
        inner.applicants.insert(applicant.id.0, applicant.clone());
        applicant
    }

    /// Pre-populate a PENDING application, bypassing the workflow
    pub fn seed_pending_application(
        &self,
        applicant_id: ApplicantId,
        requested_amount: Decimal,
    ) -> Application {
        let mut inner = self.inner.write().unwrap();
        inner.next_application_id += 1;
        let application = Application {
            id: ApplicationId(inner.next_application_id),
            applicant_id,
            requested_amount,
            status: ApplicationStatus::Pending,
            approved_amount: None,
            approved_term: None,
            created_at: Utc::now(),
        };
        inner
            .applications
            .insert(application.id.0, application.clone());
        application
    }
}

fn page_of<T>(rows: Vec<T>, pageable: Pageable) -> Page<T> {
    let total = rows.len() as u64;
    let window = clamp_page(pageable, total);
    let content = rows
        .into_iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .collect();
    Page::new(window.page, total, content)
}

// ============================================================================
// In-Memory Applicant Repository
// ============================================================================

pub struct InMemoryApplicantRepository {
    store: InMemoryStore,
}

impl InMemoryApplicantRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApplicantRepository for InMemoryApplicantRepository {
    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError> {
        let inner = self.store.inner.read().unwrap();
        Ok(inner.applicants.get(&id.0).cloned())
    }

    async fn find_by_passport(&self, passport: &str) -> Result<Option<Applicant>, DomainError> {
        let inner = self.store.inner.read().unwrap();
        Ok(inner
            .passport_index
            .get(passport)
            .and_then(|id| inner.applicants.get(id))
            .cloned())
    }

    async fn insert(&self, applicant: &NewApplicant) -> Result<Applicant, DomainError> {
        let mut inner = self.store.inner.write().unwrap();

        if inner.passport_index.contains_key(&applicant.passport) {
            return Err(DomainError::UniqueViolation(
                "client_passport_key".to_string(),
            ));
        }

        inner.next_applicant_id += 1;
        let stored = Applicant {
            id: ApplicantId(inner.next_applicant_id),
            first_name: applicant.first_name.clone(),
            last_name: applicant.last_name.clone(),
            middle_name: applicant.middle_name.clone(),
            marital_status: applicant.marital_status,
            passport: applicant.passport.clone(),
            phone: applicant.phone.clone(),
            address: applicant.address.clone(),
            organization_name: applicant.organization_name.clone(),
            position: applicant.position.clone(),
            employment_period_days: applicant.employment_period_days,
        };
        inner
            .passport_index
            .insert(stored.passport.clone(), stored.id.0);
        inner.applicants.insert(stored.id.0, stored.clone());
        Ok(stored)
    }

    async fn find_page(
        &self,
        pageable: Pageable,
        filter: &ApplicantFilter,
    ) -> Result<Page<Applicant>, DomainError> {
        let inner = self.store.inner.read().unwrap();
        let rows: Vec<Applicant> = inner
            .applicants
            .values()
            .filter(|a| matches_filter(a, filter))
            .cloned()
            .collect();
        Ok(page_of(rows, pageable))
    }
}

fn matches_filter(applicant: &Applicant, filter: &ApplicantFilter) -> bool {
    filter
        .first_name
        .as_ref()
        .map_or(true, |v| &applicant.first_name == v)
        && filter
            .last_name
            .as_ref()
            .map_or(true, |v| &applicant.last_name == v)
        && filter
            .middle_name
            .as_ref()
            .map_or(true, |v| applicant.middle_name.as_ref() == Some(v))
        && filter
            .phone
            .as_ref()
            .map_or(true, |v| &applicant.phone == v)
        && filter
            .passport
            .as_ref()
            .map_or(true, |v| &applicant.passport == v)
}

// ============================================================================
// In-Memory Application Repository
// ============================================================================

pub struct InMemoryApplicationRepository {
    store: InMemoryStore,
}

impl InMemoryApplicationRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<Application, DomainError> {
        let mut inner = self.store.inner.write().unwrap();
        inner.next_application_id += 1;
        let stored = Application {
            id: ApplicationId(inner.next_application_id),
            applicant_id: application.applicant_id,
            requested_amount: application.requested_amount,
            status: ApplicationStatus::Pending,
            approved_amount: None,
            approved_term: None,
            created_at: Utc::now(),
        };
        inner.applications.insert(stored.id.0, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, DomainError> {
        Ok(self.store.application_record(id))
    }

    async fn record_rejection(&self, id: &ApplicationId) -> Result<(), DomainError> {
        let mut inner = self.store.inner.write().unwrap();
        let application = inner
            .applications
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound(format!("credit application {}", id)))?;
        application.status = ApplicationStatus::Rejected;
        Ok(())
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<ApplicationRecord>, DomainError> {
        let inner = self.store.inner.read().unwrap();
        let rows: Vec<ApplicationRecord> = inner
            .applications
            .values()
            .map(|application| ApplicationRecord {
                application: application.clone(),
                agreement_id: inner
                    .agreement_index
                    .get(&application.id.0)
                    .copied()
                    .map(AgreementId),
            })
            .collect();
        Ok(page_of(rows, pageable))
    }
}

// ============================================================================
// In-Memory Agreement Repository
// ============================================================================

pub struct InMemoryAgreementRepository {
    store: InMemoryStore,
}

impl InMemoryAgreementRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AgreementRepository for InMemoryAgreementRepository {
    async fn create(
        &self,
        application_id: &ApplicationId,
        approved_amount: Decimal,
        approved_term: i32,
    ) -> Result<Agreement, DomainError> {
        // One critical section = one transaction: the uniqueness check, the
        // agreement insert and the application update commit together.
        let mut inner = self.store.inner.write().unwrap();

        if inner.agreement_index.contains_key(&application_id.0) {
            return Err(DomainError::UniqueViolation(
                "credit_agreement_credit_application_id_key".to_string(),
            ));
        }
        if !inner.applications.contains_key(&application_id.0) {
            return Err(DomainError::NotFound(format!(
                "credit application {}",
                application_id
            )));
        }

        inner.next_agreement_id += 1;
        let agreement = Agreement {
            id: AgreementId(inner.next_agreement_id),
            application_id: *application_id,
            signed_at: None,
            signing_status: SigningStatus::NotSigned,
        };
        inner
            .agreement_index
            .insert(application_id.0, agreement.id.0);
        inner.agreements.insert(agreement.id.0, agreement.clone());

        let application = inner
            .applications
            .get_mut(&application_id.0)
            .expect("checked above");
        application.status = ApplicationStatus::Approved;
        application.approved_amount = Some(approved_amount);
        application.approved_term = Some(approved_term);

        Ok(agreement)
    }

    async fn find_by_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Option<Agreement>, DomainError> {
        let inner = self.store.inner.read().unwrap();
        Ok(inner
            .agreement_index
            .get(&application_id.0)
            .and_then(|id| inner.agreements.get(id))
            .cloned())
    }

    async fn sign(
        &self,
        id: &AgreementId,
        signed_at: DateTime<Utc>,
    ) -> Result<Agreement, DomainError> {
        let mut inner = self.store.inner.write().unwrap();
        let agreement = inner
            .agreements
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound(format!("credit agreement {}", id)))?;

        let wrote = if agreement.signing_status == SigningStatus::NotSigned {
            agreement.signing_status = SigningStatus::Signed;
            agreement.signed_at = Some(signed_at);
            true
        } else {
            false
        };
        let stored = agreement.clone();
        if wrote {
            inner.sign_writes += 1;
        }

        Ok(stored)
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<Agreement>, DomainError> {
        let inner = self.store.inner.read().unwrap();
        let rows: Vec<Agreement> = inner.agreements.values().cloned().collect();
        Ok(page_of(rows, pageable))
    }
}

// ============================================================================
// Decision Strategies
// ============================================================================

/// Strategy approving every application with a fixed term
pub struct ApproveAll {
    pub term_days: i32,
}

impl DecisionStrategy for ApproveAll {
    fn approve(&self) -> bool {
        true
    }

    fn term_days(&self) -> i32 {
        self.term_days
    }
}

/// Strategy rejecting every application
pub struct RejectAll;

impl DecisionStrategy for RejectAll {
    fn approve(&self) -> bool {
        false
    }

    fn term_days(&self) -> i32 {
        unreachable!("a rejecting strategy never draws a term")
    }
}
