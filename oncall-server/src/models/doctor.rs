//! Doctor inputs: create payloads, partial updates and work-day sets

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{read_date, read_dates, read_id, read_string, read_time, truthy, Payload};
use super::{CleanText, ValidationError};

/// Fields a create request must carry
pub const REQUIRED_FIELDS: [&str; 5] =
    ["name", "specialty", "work_days", "shift_start", "shift_end"];

static NULL: Value = Value::Null;

/// Recurring working weekdays, 1 (Monday) through 7 (Sunday).
///
/// Order is kept as supplied; duplicates are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDays(Vec<u8>);

impl WorkDays {
    pub const FIELD: &'static str = "work_days";

    pub fn new(days: Vec<i64>) -> Result<Self, ValidationError> {
        let mut out: Vec<u8> = Vec::with_capacity(days.len());
        for day in days {
            if !(1..=7).contains(&day) {
                return Err(ValidationError::OutOfRange {
                    field: Self::FIELD,
                    value: day,
                    min: 1,
                    max: 7,
                });
            }
            let day = day as u8;
            if out.contains(&day) {
                return Err(ValidationError::Duplicate {
                    field: Self::FIELD,
                    value: day.to_string(),
                });
            }
            out.push(day);
        }
        Ok(Self(out))
    }

    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let items = value.as_array().ok_or(ValidationError::InvalidFormat {
            field: Self::FIELD,
            reason: "must be an array of weekday numbers",
        })?;

        let days = items
            .iter()
            .map(|v| {
                v.as_i64().ok_or(ValidationError::InvalidFormat {
                    field: Self::FIELD,
                    reason: "must be an array of weekday numbers",
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(days)
    }

    pub fn days(&self) -> &[u8] {
        &self.0
    }
}

/// Validated doctor ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewDoctor {
    pub name: CleanText,
    pub specialty: CleanText,
    pub work_days: WorkDays,
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
    pub leave_days: Vec<NaiveDate>,
    pub off_days: Vec<NaiveDate>,
}

impl NewDoctor {
    /// Validate a create payload. Missing required fields are reported
    /// together before any value is parsed.
    pub fn from_payload(payload: &Payload) -> Result<Self, ValidationError> {
        payload.require(&REQUIRED_FIELDS)?;

        let field = |name: &'static str| payload.get(name).unwrap_or(&NULL);

        Ok(Self {
            name: CleanText::new("name", read_string("name", field("name"))?)?,
            specialty: CleanText::new("specialty", read_string("specialty", field("specialty"))?)?,
            work_days: WorkDays::from_value(field("work_days"))?,
            shift_start: read_time("shift_start", field("shift_start"))?,
            shift_end: read_time("shift_end", field("shift_end"))?,
            leave_days: match payload.get("leave_days") {
                Some(v) => read_dates("leave_days", v)?,
                None => Vec::new(),
            },
            off_days: match payload.get("off_days") {
                Some(v) => read_dates("off_days", v)?,
                None => Vec::new(),
            },
        })
    }
}

/// One column assignment in a doctor update
#[derive(Debug, Clone, PartialEq)]
pub enum DoctorChange {
    Name(CleanText),
    Specialty(CleanText),
    WorkDays(WorkDays),
    ShiftStart(NaiveTime),
    ShiftEnd(NaiveTime),
    LeaveDays(Vec<NaiveDate>),
    OffDays(Vec<NaiveDate>),
    LastOnCallDate(NaiveDate),
    MandatoryRest(bool),
}

impl DoctorChange {
    /// Updatable fields in the order they are applied
    pub const FIELDS: [&'static str; 9] = [
        "name",
        "specialty",
        "work_days",
        "shift_start",
        "shift_end",
        "leave_days",
        "off_days",
        "last_on_call_date",
        "is_on_mandatory_rest",
    ];

    /// Parse the value for one updatable field. Unknown names yield `None`.
    pub fn parse(field: &str, value: &Value) -> Option<Result<Self, ValidationError>> {
        let change = match field {
            "name" => read_string("name", value)
                .and_then(|s| CleanText::new("name", s))
                .map(Self::Name),
            "specialty" => read_string("specialty", value)
                .and_then(|s| CleanText::new("specialty", s))
                .map(Self::Specialty),
            "work_days" => WorkDays::from_value(value).map(Self::WorkDays),
            "shift_start" => read_time("shift_start", value).map(Self::ShiftStart),
            "shift_end" => read_time("shift_end", value).map(Self::ShiftEnd),
            "leave_days" => read_dates("leave_days", value).map(Self::LeaveDays),
            "off_days" => read_dates("off_days", value).map(Self::OffDays),
            "last_on_call_date" => read_date("last_on_call_date", value).map(Self::LastOnCallDate),
            "is_on_mandatory_rest" => Ok(Self::MandatoryRest(truthy(value))),
            _ => return None,
        };
        Some(change)
    }

    /// Column written by this change
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Specialty(_) => "specialty",
            Self::WorkDays(_) => "work_days",
            Self::ShiftStart(_) => "shift_start",
            Self::ShiftEnd(_) => "shift_end",
            Self::LeaveDays(_) => "leave_days",
            Self::OffDays(_) => "off_days",
            Self::LastOnCallDate(_) => "last_on_call_date",
            Self::MandatoryRest(_) => "is_on_mandatory_rest",
        }
    }
}

/// Partial doctor update: only supplied fields change
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorPatch {
    pub id: i64,
    changes: Vec<DoctorChange>,
}

impl DoctorPatch {
    pub fn from_payload(payload: &Payload) -> Result<Self, ValidationError> {
        let id = payload.id("doctor")?;

        let mut changes = Vec::new();
        for field in DoctorChange::FIELDS {
            if let Some(value) = payload.get(field) {
                if let Some(change) = DoctorChange::parse(field, value) {
                    changes.push(change?);
                }
            }
        }

        if changes.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate);
        }

        Ok(Self { id, changes })
    }

    pub fn changes(&self) -> &[DoctorChange] {
        &self.changes
    }
}

/// Raw `?id=` query string for doctor lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorQueryParams {
    pub id: Option<String>,
}

impl DoctorQueryParams {
    /// Requested doctor id; an empty value means "list all".
    pub fn id(&self) -> Result<Option<i64>, ValidationError> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| read_id("id", &Value::String(s.to_owned())))
            .transpose()
    }
}
