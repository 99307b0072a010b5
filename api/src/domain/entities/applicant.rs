//! Applicant domain entity
//!
//! A person applying for credit, identified by their passport number.
//! The store owns the record; applications reference it by id only.

use serde::{Deserialize, Serialize};

/// Unique identifier for an applicant, assigned by the store on first persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub i64);

impl From<i64> for ApplicantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marital status of an applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Separated,
    Cohabiting,
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MaritalStatus::Single => "SINGLE",
            MaritalStatus::Married => "MARRIED",
            MaritalStatus::Divorced => "DIVORCED",
            MaritalStatus::Widowed => "WIDOWED",
            MaritalStatus::Separated => "SEPARATED",
            MaritalStatus::Cohabiting => "COHABITING",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for MaritalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE" => Ok(MaritalStatus::Single),
            "MARRIED" => Ok(MaritalStatus::Married),
            "DIVORCED" => Ok(MaritalStatus::Divorced),
            "WIDOWED" => Ok(MaritalStatus::Widowed),
            "SEPARATED" => Ok(MaritalStatus::Separated),
            "COHABITING" => Ok(MaritalStatus::Cohabiting),
            _ => Err(format!("Unknown marital status: {}", s)),
        }
    }
}

/// A stored applicant record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub passport: String,
    pub phone: String,
    pub address: Option<String>,
    pub organization_name: String,
    pub position: String,
    pub employment_period_days: i32,
}

impl Applicant {
    /// Field-by-field comparison against a submitted candidate.
    ///
    /// The stored record is authoritative for a passport; a submission that
    /// disagrees on any field must not proceed.
    pub fn matches(&self, candidate: &NewApplicant) -> bool {
        self.first_name == candidate.first_name
            && self.last_name == candidate.last_name
            && self.middle_name == candidate.middle_name
            && self.marital_status == candidate.marital_status
            && self.passport == candidate.passport
            && self.phone == candidate.phone
            && self.address == candidate.address
            && self.organization_name == candidate.organization_name
            && self.position == candidate.position
            && self.employment_period_days == candidate.employment_period_days
    }
}

/// Data needed to create a new applicant
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplicant {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub passport: String,
    pub phone: String,
    pub address: Option<String>,
    pub organization_name: String,
    pub position: String,
    pub employment_period_days: i32,
}
