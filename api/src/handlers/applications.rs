//! Credit application handlers
//!
//! Endpoints for submitting applications, signing agreements and the two
//! paginated listings.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{require_positive_page, PageQuery, PageResponse};
use crate::domain::entities::{
    Agreement, ApplicationRecord, ApplicationStatus, MaritalStatus, NewApplicant, SigningStatus,
};
use crate::error::AppError;
use crate::AppState;

/// Request body for submitting a credit application
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditApplicationRequest {
    pub applicant: CreditApplicantPayload,
    pub amount: Decimal,
}

/// Applicant data as submitted over the wire
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditApplicantPayload {
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

impl From<CreditApplicantPayload> for NewApplicant {
    fn from(payload: CreditApplicantPayload) -> Self {
        NewApplicant {
            first_name: payload.first_name,
            last_name: payload.last_name,
            middle_name: payload.middle_name,
            marital_status: payload.marital_status,
            passport: payload.passport,
            phone: payload.phone,
            address: payload.address,
            organization_name: payload.organization_name,
            position: payload.position,
            employment_period_days: payload.employment_period_days,
        }
    }
}

/// Wire shape of a credit application
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditApplicationResponse {
    pub id: i64,
    pub applicant_id: i64,
    pub requested_amount: Decimal,
    pub status: ApplicationStatus,
    pub approved_amount: Option<Decimal>,
    pub approved_term: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub credit_agreement_id: Option<i64>,
}

impl From<ApplicationRecord> for CreditApplicationResponse {
    fn from(record: ApplicationRecord) -> Self {
        CreditApplicationResponse {
            id: record.application.id.0,
            applicant_id: record.application.applicant_id.0,
            requested_amount: record.application.requested_amount,
            status: record.application.status,
            approved_amount: record.application.approved_amount,
            approved_term: record.application.approved_term,
            created_at: record.application.created_at,
            credit_agreement_id: record.agreement_id.map(|id| id.0),
        }
    }
}

/// Wire shape of a credit agreement
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAgreementResponse {
    pub id: i64,
    pub application_id: i64,
    pub signed_at: Option<DateTime<Utc>>,
    pub signing_status: SigningStatus,
}

impl From<Agreement> for CreditAgreementResponse {
    fn from(agreement: Agreement) -> Self {
        CreditAgreementResponse {
            id: agreement.id.0,
            application_id: agreement.application_id.0,
            signed_at: agreement.signed_at,
            signing_status: agreement.signing_status,
        }
    }
}

/// POST /api/v1/credit-application
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<CreditApplicationRequest>,
) -> Result<Json<CreditApplicationResponse>, AppError> {
    let record = state
        .workflow
        .submit(request.applicant.into(), request.amount)
        .await?;
    Ok(Json(record.into()))
}

/// PATCH /api/v1/credit-application/:credit_application_id/signing
pub async fn sign(
    State(state): State<AppState>,
    Path(credit_application_id): Path<i64>,
) -> Result<Json<CreditAgreementResponse>, AppError> {
    let agreement = state.workflow.sign(credit_application_id.into()).await?;
    Ok(Json(agreement.into()))
}

/// GET /api/v1/credit-application/list?page=N
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<CreditApplicationResponse>>, AppError> {
    let page = require_positive_page(query.page)?;
    let records = state.workflow.list_applications(page).await?;
    Ok(Json(PageResponse::from_page(records, Into::into)))
}

/// GET /api/v1/credit-application/list-agreement?page=N
pub async fn list_agreements(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<CreditAgreementResponse>>, AppError> {
    let page = require_positive_page(query.page)?;
    let agreements = state.workflow.list_agreements(page).await?;
    Ok(Json(PageResponse::from_page(agreements, Into::into)))
}
