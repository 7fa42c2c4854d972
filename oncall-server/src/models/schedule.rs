//! Schedule inputs: create payloads, partial updates and list filters

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::Value;

use super::payload::{parse_date, read_date, read_id, read_time, Payload};
use super::ValidationError;

/// Fields a create request must carry
pub const REQUIRED_FIELDS: [&str; 4] = ["doctor_id", "schedule_date", "start_time", "end_time"];

static NULL: Value = Value::Null;

/// Validated schedule ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub doctor_id: i64,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewSchedule {
    pub fn from_payload(payload: &Payload) -> Result<Self, ValidationError> {
        payload.require(&REQUIRED_FIELDS)?;

        let field = |name: &'static str| payload.get(name).unwrap_or(&NULL);

        Ok(Self {
            doctor_id: read_id("doctor_id", field("doctor_id"))?,
            schedule_date: read_date("schedule_date", field("schedule_date"))?,
            start_time: read_time("start_time", field("start_time"))?,
            end_time: read_time("end_time", field("end_time"))?,
        })
    }
}

/// One column assignment in a schedule update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleChange {
    DoctorId(i64),
    ScheduleDate(NaiveDate),
    StartTime(NaiveTime),
    EndTime(NaiveTime),
}

impl ScheduleChange {
    /// Updatable fields in the order they are applied
    pub const FIELDS: [&'static str; 4] = ["doctor_id", "schedule_date", "start_time", "end_time"];

    pub fn parse(field: &str, value: &Value) -> Option<Result<Self, ValidationError>> {
        let change = match field {
            "doctor_id" => read_id("doctor_id", value).map(Self::DoctorId),
            "schedule_date" => read_date("schedule_date", value).map(Self::ScheduleDate),
            "start_time" => read_time("start_time", value).map(Self::StartTime),
            "end_time" => read_time("end_time", value).map(Self::EndTime),
            _ => return None,
        };
        Some(change)
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::DoctorId(_) => "doctor_id",
            Self::ScheduleDate(_) => "schedule_date",
            Self::StartTime(_) => "start_time",
            Self::EndTime(_) => "end_time",
        }
    }
}

/// Partial schedule update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePatch {
    pub id: i64,
    changes: Vec<ScheduleChange>,
}

impl SchedulePatch {
    pub fn from_payload(payload: &Payload) -> Result<Self, ValidationError> {
        let id = payload.id("schedule")?;

        let mut changes = Vec::new();
        for field in ScheduleChange::FIELDS {
            if let Some(value) = payload.get(field) {
                if let Some(change) = ScheduleChange::parse(field, value) {
                    changes.push(change?);
                }
            }
        }

        if changes.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate);
        }

        Ok(Self { id, changes })
    }

    pub fn changes(&self) -> &[ScheduleChange] {
        &self.changes
    }
}

/// Raw `?date=&doctor_id=` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleQueryParams {
    pub date: Option<String>,
    pub doctor_id: Option<String>,
}

/// Validated list filter; both parts combine with AND
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub date: Option<NaiveDate>,
    pub doctor_id: Option<i64>,
}

impl TryFrom<ScheduleQueryParams> for ScheduleFilter {
    type Error = ValidationError;

    fn try_from(params: ScheduleQueryParams) -> Result<Self, Self::Error> {
        let date = params
            .date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_date("date", s))
            .transpose()?;

        let doctor_id = params
            .doctor_id
            .filter(|s| !s.trim().is_empty())
            .map(|s| read_id("doctor_id", &Value::String(s)))
            .transpose()?;

        Ok(Self { date, doctor_id })
    }
}
