//! Credit agreement domain entity
//!
//! Exists only for approved applications, one per application. The signing
//! status only ever moves NOT_SIGNED -> SIGNED.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::application::ApplicationId;

/// Unique identifier for a credit agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgreementId(pub i64);

impl From<i64> for AgreementId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AgreementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signing state of an agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SigningStatus {
    NotSigned,
    Signed,
}

impl std::fmt::Display for SigningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SigningStatus::NotSigned => "NOT_SIGNED",
            SigningStatus::Signed => "SIGNED",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for SigningStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_SIGNED" => Ok(SigningStatus::NotSigned),
            "SIGNED" => Ok(SigningStatus::Signed),
            _ => Err(format!("Unknown signing status: {}", s)),
        }
    }
}

/// A stored credit agreement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agreement {
    pub id: AgreementId,
    pub application_id: ApplicationId,
    /// Set exactly once, at the first successful sign
    pub signed_at: Option<DateTime<Utc>>,
    pub signing_status: SigningStatus,
}

impl Agreement {
    pub fn is_signed(&self) -> bool {
        self.signing_status == SigningStatus::Signed
    }
}
