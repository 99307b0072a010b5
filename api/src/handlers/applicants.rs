//! Applicant search handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{require_positive_page, PageQuery, PageResponse};
use crate::domain::entities::{Applicant, MaritalStatus};
use crate::domain::pagination::Pageable;
use crate::domain::ports::ApplicantFilter;
use crate::error::AppError;
use crate::AppState;

/// Request body for applicant search; present fields match by exact equality
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindApplicantsRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub passport: Option<String>,
}

impl From<FindApplicantsRequest> for ApplicantFilter {
    fn from(request: FindApplicantsRequest) -> Self {
        ApplicantFilter {
            first_name: request.first_name,
            last_name: request.last_name,
            middle_name: request.middle_name,
            phone: request.phone,
            passport: request.passport,
        }
    }
}

/// Wire shape of an applicant
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    pub id: i64,
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

impl From<Applicant> for ApplicantResponse {
    fn from(applicant: Applicant) -> Self {
        ApplicantResponse {
            id: applicant.id.0,
            first_name: applicant.first_name,
            last_name: applicant.last_name,
            middle_name: applicant.middle_name,
            marital_status: applicant.marital_status,
            passport: applicant.passport,
            phone: applicant.phone,
            address: applicant.address,
            organization_name: applicant.organization_name,
            position: applicant.position,
            employment_period_days: applicant.employment_period_days,
        }
    }
}

/// POST /api/v1/client/find?page=N
pub async fn find_applicants(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    Json(request): Json<FindApplicantsRequest>,
) -> Result<Json<PageResponse<ApplicantResponse>>, AppError> {
    let page = require_positive_page(query.page)?;
    let filter: ApplicantFilter = request.into();
    let applicants = state
        .registry
        .find_page(Pageable::new(page, state.page_size), &filter)
        .await?;
    Ok(Json(PageResponse::from_page(applicants, Into::into)))
}
