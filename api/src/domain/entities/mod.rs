//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod agreement;
pub mod applicant;
pub mod application;

pub use agreement::{Agreement, AgreementId, SigningStatus};
pub use applicant::{Applicant, ApplicantId, MaritalStatus, NewApplicant};
pub use application::{
    Application, ApplicationId, ApplicationRecord, ApplicationStatus, NewApplication,
};
