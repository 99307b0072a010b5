//! Request field validation
//!
//! Syntactic checks on submitted applicant data and search filters, collected
//! per field into a `GroupValidation`. Blankness and length are independent
//! checks; either alone invalidates a value.

use regex::Regex;
use rust_decimal::Decimal;

use crate::domain::entities::NewApplicant;
use crate::domain::ports::ApplicantFilter;
use crate::error::{GroupValidation, Violation};

const MAX_NAME_LENGTH: usize = 64;
const MAX_ORGANIZATION_LENGTH: usize = 96;
const MAX_POSITION_LENGTH: usize = 64;
const MAX_ADDRESS_LENGTH: usize = 128;

const NAME_PATTERN: &str = r"^[A-Z][a-z]*(?:[ '-][A-Za-z]+)*$";
const PASSPORT_PATTERN: &str = r"^\d{10}$";
const PHONE_PATTERN: &str = r"^\+?\d{11}$";

/// Validates request fields against the service's syntactic rules
pub struct Validator {
    name_pattern: Regex,
    passport_pattern: Regex,
    phone_pattern: Regex,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            name_pattern: Regex::new(NAME_PATTERN).expect("name pattern must compile"),
            passport_pattern: Regex::new(PASSPORT_PATTERN).expect("passport pattern must compile"),
            phone_pattern: Regex::new(PHONE_PATTERN).expect("phone pattern must compile"),
        }
    }

    /// Validate a full submission: applicant fields plus the requested amount
    pub fn validate_submission(
        &self,
        applicant: &NewApplicant,
        amount: Decimal,
    ) -> Result<(), GroupValidation> {
        let mut violations = Vec::new();

        self.check_name(&mut violations, "firstName", &applicant.first_name);
        self.check_name(&mut violations, "lastName", &applicant.last_name);
        if let Some(middle_name) = &applicant.middle_name {
            self.check_name(&mut violations, "middleName", middle_name);
        }
        self.check_passport(&mut violations, &applicant.passport);
        self.check_phone(&mut violations, &applicant.phone);

        check_required_text(
            &mut violations,
            "organizationName",
            &applicant.organization_name,
            MAX_ORGANIZATION_LENGTH,
        );
        check_required_text(
            &mut violations,
            "position",
            &applicant.position,
            MAX_POSITION_LENGTH,
        );

        if let Some(address) = &applicant.address {
            if address.chars().count() > MAX_ADDRESS_LENGTH {
                violations.push(Violation::new(
                    "address",
                    format!("must be at most {} characters long", MAX_ADDRESS_LENGTH),
                ));
            }
        }

        if applicant.employment_period_days < 0 {
            violations.push(Violation::new(
                "employmentPeriodDays",
                "must not be negative",
            ));
        }

        if amount <= Decimal::ZERO {
            violations.push(Violation::new("amount", "must be greater than 0"));
        }

        into_result(violations)
    }

    /// Validate the present fields of an applicant search filter
    pub fn validate_filter(&self, filter: &ApplicantFilter) -> Result<(), GroupValidation> {
        let mut violations = Vec::new();

        if let Some(first_name) = &filter.first_name {
            self.check_name(&mut violations, "firstName", first_name);
        }
        if let Some(last_name) = &filter.last_name {
            self.check_name(&mut violations, "lastName", last_name);
        }
        if let Some(middle_name) = &filter.middle_name {
            self.check_name(&mut violations, "middleName", middle_name);
        }
        if let Some(phone) = &filter.phone {
            self.check_phone(&mut violations, phone);
        }
        if let Some(passport) = &filter.passport {
            self.check_passport(&mut violations, passport);
        }

        into_result(violations)
    }

    fn check_name(&self, violations: &mut Vec<Violation>, field: &str, name: &str) {
        if name.trim().is_empty() {
            violations.push(Violation::new(field, "must not be blank"));
            return;
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            violations.push(Violation::new(
                field,
                format!("must be at most {} characters long", MAX_NAME_LENGTH),
            ));
            return;
        }
        if !self.name_pattern.is_match(name) {
            violations.push(Violation::new(
                field,
                "must start with an uppercase letter and contain only letters, spaces, hyphens and apostrophes",
            ));
        }
    }

    fn check_passport(&self, violations: &mut Vec<Violation>, passport: &str) {
        if !self.passport_pattern.is_match(passport) {
            violations.push(Violation::new(
                "passport",
                "must consist of exactly 10 digits",
            ));
        }
    }

    fn check_phone(&self, violations: &mut Vec<Violation>, phone: &str) {
        if !self.phone_pattern.is_match(phone) {
            violations.push(Violation::new(
                "phone",
                "must consist of 11 digits with an optional leading plus sign",
            ));
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Validator {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn check_required_text(violations: &mut Vec<Violation>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "must not be blank"));
        return;
    }
    if value.chars().count() > max {
        violations.push(Violation::new(
            field,
            format!("must be at most {} characters long", max),
        ));
    }
}

fn into_result(violations: Vec<Violation>) -> Result<(), GroupValidation> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(GroupValidation::new(violations))
    }
}
