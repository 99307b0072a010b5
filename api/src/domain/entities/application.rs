//! Credit application domain entity
//!
//! Created PENDING at submission, moved exactly once to APPROVED or REJECTED
//! by evaluation. The approved amount and term exist only on approval.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::agreement::AgreementId;
use super::applicant::ApplicantId;

/// Unique identifier for a credit application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub i64);

impl From<i64> for ApplicationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a credit application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "APPROVED" => Ok(ApplicationStatus::Approved),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            _ => Err(format!("Unknown application status: {}", s)),
        }
    }
}

/// A stored credit application
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub requested_amount: Decimal,
    pub status: ApplicationStatus,
    /// Present iff status = APPROVED
    pub approved_amount: Option<Decimal>,
    /// Term in days, present iff status = APPROVED
    pub approved_term: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// An application together with the id of its agreement, when one exists.
///
/// The agreement back-reference is a lookup, not an owned object graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRecord {
    pub application: Application,
    pub agreement_id: Option<AgreementId>,
}

/// Data needed to create a new application; the store assigns the id, the
/// PENDING status and the creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub applicant_id: ApplicantId,
    pub requested_amount: Decimal,
}
