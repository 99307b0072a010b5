//! Unified error types for the APM API
//!
//! This module defines error types for each layer:
//! - `DomainError`: storage/port level errors
//! - `GroupValidation`: per-field validation failures
//! - `AppError`: application layer errors (wraps domain errors for HTTP responses)

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::ApplicationId;

/// Port-level errors surfaced by the repository implementations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected a write. The payload is the
    /// storage-side message naming the violated constraint; callers branch on
    /// the variant, never on the text.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single field that failed syntactic validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field, e.g. `firstName`
    pub field: String,
    /// Human-readable rule the value broke
    pub rule: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

/// All field violations of one request, reported together
#[derive(Debug, Clone, Error)]
#[error("validation failed for {} field(s)", .violations.len())]
pub struct GroupValidation {
    pub violations: Vec<Violation>,
}

impl GroupValidation {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.violations
            .iter()
            .map(|v| (v.field.clone(), v.rule.clone()))
            .collect()
    }
}

/// Application layer errors - used by the services and HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Validation(#[from] GroupValidation),

    #[error("The data provided does not match the information about the client available in the system.")]
    ClientInfoMismatch,

    #[error("Credit application with id {0} not found")]
    ApplicationNotFound(ApplicationId),

    #[error("Credit application {0} is still pending and cannot be signed")]
    PendingDuringSigning(ApplicationId),

    #[error("Credit application {0} was rejected and cannot be signed")]
    RejectedDuringSigning(ApplicationId),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_properties: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, invalid_properties) = match &self {
            AppError::Validation(group) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                None,
                Some(group.to_map()),
            ),
            AppError::ClientInfoMismatch => (
                StatusCode::BAD_REQUEST,
                "Client info mismatch",
                Some(self.to_string()),
                None,
            ),
            AppError::ApplicationNotFound(_) => {
                (StatusCode::NOT_FOUND, "Not found", Some(self.to_string()), None)
            }
            AppError::PendingDuringSigning(_) | AppError::RejectedDuringSigning(_) => (
                StatusCode::CONFLICT,
                "Signing conflict",
                Some(self.to_string()),
                None,
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()), None)
            }
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()), None)
            }
            // A uniqueness conflict escaping the retry machinery is an
            // internal failure, never a client error.
            AppError::Domain(
                DomainError::UniqueViolation(msg)
                | DomainError::Database(msg)
                | DomainError::Internal(msg),
            ) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            invalid_properties,
        });

        (status, body).into_response()
    }
}
