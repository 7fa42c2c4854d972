//! Validation error types
//!
//! The `Display` output of every variant is the message returned to the
//! client inside the response envelope.

use std::fmt;

/// Validation error for request payloads and domain inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty after sanitisation
    Empty { field: &'static str },

    /// One or more required fields absent from a create payload
    MissingFields { fields: Vec<&'static str> },

    /// Identifier required by update/delete is absent
    MissingId { resource: &'static str },

    /// Update payload contains none of the updatable fields
    NoFieldsToUpdate,

    /// Value has the wrong shape (e.g. not a date)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric value outside its allowed range
    OutOfRange { field: &'static str, value: i64, min: i64, max: i64 },

    /// Repeated element in a set-like field
    Duplicate { field: &'static str, value: String },

    /// Request body could not be read as a JSON object
    InvalidBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::MissingFields { fields } => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::MissingId { resource } => write!(f, "{} ID is required", capitalize(resource)),
            Self::NoFieldsToUpdate => f.write_str("No fields to update"),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{}: {} is outside {}..={}", field, value, min, max),
            Self::Duplicate { field, value } => {
                write!(f, "{}: duplicate value '{}'", field, value)
            }
            Self::InvalidBody { reason } => write!(f, "Invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Upper-case the first character (`doctor` -> `Doctor`).
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
