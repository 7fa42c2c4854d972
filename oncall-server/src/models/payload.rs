//! JSON request payloads and typed field readers
//!
//! A [`Payload`] is the decoded request body. Field readers turn loosely
//! typed JSON values into the domain types used by the repositories and
//! report failures as [`ValidationError`]s naming the offending field.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};

use super::ValidationError;

/// Accepted date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decoded JSON object from a request body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Field value if the key exists and is not `null`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Whether the key exists with a non-null value.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Required fields that are absent or blank, in the order given.
    pub fn missing(&self, required: &[&'static str]) -> Vec<&'static str> {
        required
            .iter()
            .copied()
            .filter(|field| self.get(field).map_or(true, is_blank))
            .collect()
    }

    /// Fail with [`ValidationError::MissingFields`] unless every field is filled.
    pub fn require(&self, required: &[&'static str]) -> Result<(), ValidationError> {
        let fields = self.missing(required);
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields { fields })
        }
    }

    /// Read the `id` field used by update and delete.
    ///
    /// A blank id (`0`, `"0"`, `""`) is reported as missing, like any other
    /// required field.
    pub fn id(&self, resource: &'static str) -> Result<i64, ValidationError> {
        let value = self
            .get("id")
            .filter(|v| !is_blank(v))
            .ok_or(ValidationError::MissingId { resource })?;
        read_id("id", value)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Blank values count as missing: empty or whitespace strings, `0`,
/// `"0"`, `false`, and empty arrays or objects.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Loose truthiness used for boolean flags sent as numbers or strings.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::String(s) => !(s.is_empty() || s == "0"),
        other => !is_blank(other),
    }
}

/// Positive integer id given as a JSON number or numeric string.
pub fn read_id(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or(ValidationError::InvalidFormat {
        field,
        reason: "must be an integer",
    })?;

    if id < 1 {
        return Err(ValidationError::OutOfRange {
            field,
            value: id,
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(id)
}

pub fn read_string<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or(ValidationError::InvalidFormat {
        field,
        reason: "must be a string",
    })
}

/// Calendar date in `YYYY-MM-DD` form.
pub fn read_date(field: &'static str, value: &Value) -> Result<NaiveDate, ValidationError> {
    parse_date(field, read_string(field, value)?)
}

pub fn parse_date(field: &'static str, s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be a date in YYYY-MM-DD format",
    })
}

/// Time of day in `HH:MM:SS` or `HH:MM` form.
pub fn read_time(field: &'static str, value: &Value) -> Result<NaiveTime, ValidationError> {
    let s = read_string(field, value)?.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be a time in HH:MM:SS format",
        })
}

/// JSON array of dates.
pub fn read_dates(field: &'static str, value: &Value) -> Result<Vec<NaiveDate>, ValidationError> {
    value
        .as_array()
        .ok_or(ValidationError::InvalidFormat {
            field,
            reason: "must be an array of dates",
        })?
        .iter()
        .map(|v| read_date(field, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(map) => Payload::new(map),
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn missing_lists_absent_and_blank_fields_in_order() {
        let p = payload(json!({
            "name": "Dr. Lee",
            "specialty": "",
            "work_days": [],
            "shift_start": null
        }));
        assert_eq!(
            p.missing(&["name", "specialty", "work_days", "shift_start", "shift_end"]),
            vec!["specialty", "work_days", "shift_start", "shift_end"]
        );
    }

    #[test]
    fn require_passes_when_all_present() {
        let p = payload(json!({"doctor_id": 3, "schedule_date": "2024-06-10"}));
        assert!(p.require(&["doctor_id", "schedule_date"]).is_ok());
    }

    #[test]
    fn blank_values() {
        assert!(is_blank(&json!(0)));
        assert!(is_blank(&json!("0")));
        assert!(is_blank(&json!("  ")));
        assert!(is_blank(&json!(false)));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!(1)));
        assert!(!is_blank(&json!([1])));
        assert!(!is_blank(&json!("x")));
    }

    #[test]
    fn truthiness() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!(" ")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!("")));
    }

    #[test]
    fn id_accepts_numbers_and_numeric_strings() {
        assert_eq!(read_id("id", &json!(12)).unwrap(), 12);
        assert_eq!(read_id("id", &json!("12")).unwrap(), 12);
        assert!(matches!(
            read_id("id", &json!("twelve")),
            Err(ValidationError::InvalidFormat { field: "id", .. })
        ));
        assert!(matches!(
            read_id("id", &json!(-4)),
            Err(ValidationError::OutOfRange { field: "id", .. })
        ));
    }

    #[test]
    fn payload_id_reports_missing_resource() {
        let p = payload(json!({"name": "x"}));
        assert_eq!(
            p.id("doctor").unwrap_err(),
            ValidationError::MissingId { resource: "doctor" }
        );
    }

    #[test]
    fn payload_id_treats_blank_as_missing() {
        for id in [json!(0), json!("0"), json!(""), json!(false)] {
            let p = payload(json!({ "id": id }));
            assert_eq!(
                p.id("schedule").unwrap_err(),
                ValidationError::MissingId { resource: "schedule" }
            );
        }
        assert!(matches!(
            payload(json!({"id": -3})).id("doctor"),
            Err(ValidationError::OutOfRange { field: "id", .. })
        ));
    }

    #[test]
    fn times_with_and_without_seconds() {
        let t = read_time("shift_start", &json!("09:00:00")).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let t = read_time("shift_start", &json!("17:30")).unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        assert!(read_time("shift_start", &json!("25:00")).is_err());
    }

    #[test]
    fn dates_array() {
        let dates = read_dates("leave_days", &json!(["2024-06-10", "2024-06-11"])).unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

        assert!(read_dates("leave_days", &json!("2024-06-10")).is_err());
        assert!(read_dates("leave_days", &json!(["10/06/2024"])).is_err());
    }
}
