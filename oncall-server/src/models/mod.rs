//! Domain models with validation at construction
//!
//! Request payloads are turned into these types before any statement is
//! executed. Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod sanitize;
pub mod payload;
pub mod doctor;
pub mod schedule;

pub use validation::ValidationError;
pub use sanitize::CleanText;
pub use payload::Payload;
pub use doctor::{DoctorChange, DoctorPatch, DoctorQueryParams, NewDoctor, WorkDays};
pub use schedule::{
    NewSchedule, ScheduleChange, ScheduleFilter, SchedulePatch, ScheduleQueryParams,
};
