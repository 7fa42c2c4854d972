//! API error types with IntoResponse
//!
//! Errors are converted to error envelopes with appropriate status codes.
//! Storage failures are logged in full and reported to the client with a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::envelope::Envelope;
use crate::db::repos::DbError;
use crate::models::validation::capitalize;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Referenced entity absent (404)
    NotFound { resource: &'static str, id: String },

    /// Uniqueness violation (409)
    Conflict { message: String },

    /// Verb not supported on this resource (405)
    MethodNotAllowed,

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "lookup missed");
                format!("{} not found", capitalize(resource))
            }
            Self::Conflict { message } => message,
            Self::MethodNotAllowed => "Method not allowed".to_owned(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_owned()
            }
        };

        Envelope::error(status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { message } => Self::Conflict { message },
            _ => Self::Database(e),
        }
    }
}
