//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; holds no state between calls
//! - Zero affected rows on update/delete is reported as `NotFound`
//! - Uses transactions for multi-step operations

pub mod doctors;
pub mod schedules;

pub use doctors::{Doctor, DoctorRepo};
pub use schedules::{Schedule, ScheduleRepo, ScheduleWithDoctor};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {message}")]
    Conflict { message: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
