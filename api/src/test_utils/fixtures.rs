//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{MaritalStatus, NewApplicant};

/// Create a valid applicant candidate with the given passport
pub fn test_new_applicant(passport: &str) -> NewApplicant {
    NewApplicant {
        first_name: "Ivan".to_string(),
        last_name: "Ivanov".to_string(),
        middle_name: Some("Ivanovich".to_string()),
        marital_status: Some(MaritalStatus::Married),
        passport: passport.to_string(),
        phone: "+79991234567".to_string(),
        address: Some("Address".to_string()),
        organization_name: "Organization".to_string(),
        position: "Position".to_string(),
        employment_period_days: 365,
    }
}

/// Create a valid applicant candidate with a distinct identity per index
pub fn test_new_applicant_numbered(index: u32) -> NewApplicant {
    let mut applicant = test_new_applicant(&format!("{:010}", index));
    applicant.first_name = "Pyotr".to_string();
    applicant.last_name = format!("Petrov{}", suffix(index));
    applicant
}

fn suffix(index: u32) -> String {
    // Keep the generated last name pattern-valid: letters only.
    const LETTERS: [char; 10] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];
    index
        .to_string()
        .chars()
        .map(|c| LETTERS[c.to_digit(10).unwrap() as usize])
        .collect()
}
