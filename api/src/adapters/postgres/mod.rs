//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.
//! Uniqueness races are arbitrated by the database constraints; a violation
//! is mapped to `DomainError::UniqueViolation` so the services can branch on
//! it without touching driver internals.

pub mod agreement_repo;
pub mod applicant_repo;
pub mod application_repo;

#[cfg(test)]
mod integration_tests;

pub use agreement_repo::PostgresAgreementRepository;
pub use applicant_repo::PostgresApplicantRepository;
pub use application_repo::PostgresApplicationRepository;

use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

/// Map a SeaORM error to the domain error space, keeping unique-constraint
/// violations distinguishable.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::UniqueViolation(msg),
        _ => DomainError::Database(e.to_string()),
    }
}
