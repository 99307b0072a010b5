//! HTTP handlers
//!
//! Thin axum layer over the application services. Request-shape validation
//! (positive page numbers, JSON decoding) happens here; business rules live
//! in the services.

pub mod applicants;
pub mod applications;

pub use applicants::find_applicants;
pub use applications::{list_agreements, list_applications, sign, submit};

use serde::{Deserialize, Serialize};

use crate::domain::pagination::Page;
use crate::error::AppError;

/// Query string carrying the requested page number
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: i64,
}

/// Reject non-positive page numbers before they reach the page clamp
pub(crate) fn require_positive_page(page: i64) -> Result<u64, AppError> {
    if page < 1 {
        return Err(AppError::BadRequest(format!(
            "page must be positive, got {}",
            page
        )));
    }
    Ok(page as u64)
}

/// Wire shape of a page of results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub content: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn from_page<E>(page: Page<E>, f: impl FnMut(E) -> T) -> Self {
        let page = page.map(f);
        Self {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            content: page.content,
        }
    }
}
