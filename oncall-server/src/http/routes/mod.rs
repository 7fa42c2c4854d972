//! Route handlers organized by resource

pub mod health;
pub mod doctors;
pub mod schedules;
pub mod setup;

use axum::http::StatusCode;

use super::error::ApiError;

/// OPTIONS without CORS preflight headers: empty 200.
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any verb a resource does not handle.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
