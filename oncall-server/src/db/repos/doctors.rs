//! Doctor repository
//!
//! - list: all doctors ordered by name
//! - update: single UPDATE built from the supplied changes only

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{DoctorChange, DoctorPatch, NewDoctor, WorkDays};

const SELECT_DOCTOR: &str = r#"
    SELECT id, name, specialty, work_days, shift_start, shift_end,
           leave_days, off_days, last_on_call_date, is_on_mandatory_rest,
           created_at, updated_at
    FROM doctors
"#;

/// Doctor record as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub work_days: WorkDays,
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
    pub leave_days: Vec<NaiveDate>,
    pub off_days: Vec<NaiveDate>,
    pub last_on_call_date: Option<NaiveDate>,
    pub is_on_mandatory_rest: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row; array columns are JSONB and the two date lists may be NULL
#[derive(FromRow)]
struct DoctorRow {
    id: i64,
    name: String,
    specialty: String,
    work_days: Json<WorkDays>,
    shift_start: NaiveTime,
    shift_end: NaiveTime,
    leave_days: Option<Json<Vec<NaiveDate>>>,
    off_days: Option<Json<Vec<NaiveDate>>>,
    last_on_call_date: Option<NaiveDate>,
    is_on_mandatory_rest: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DoctorRow> for Doctor {
    fn from(r: DoctorRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            specialty: r.specialty,
            work_days: r.work_days.0,
            shift_start: r.shift_start,
            shift_end: r.shift_end,
            leave_days: r.leave_days.map(|j| j.0).unwrap_or_default(),
            off_days: r.off_days.map(|j| j.0).unwrap_or_default(),
            last_on_call_date: r.last_on_call_date,
            is_on_mandatory_rest: r.is_on_mandatory_rest,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Doctor repository
pub struct DoctorRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> DoctorRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All doctors ordered by name.
    pub async fn list(&self) -> Result<Vec<Doctor>, DbError> {
        let rows: Vec<DoctorRow> = sqlx::query_as(&format!("{SELECT_DOCTOR} ORDER BY name, id"))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Doctor::from).collect())
    }

    /// Get a single doctor by id.
    pub async fn get(&self, id: i64) -> Result<Doctor, DbError> {
        let row: DoctorRow = sqlx::query_as(&format!("{SELECT_DOCTOR} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("doctor", id))?;

        Ok(row.into())
    }

    /// Insert a doctor and return the generated id.
    pub async fn create(&self, doctor: NewDoctor) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO doctors
                (name, specialty, work_days, shift_start, shift_end, leave_days, off_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(doctor.name.into_string())
        .bind(doctor.specialty.into_string())
        .bind(Json(doctor.work_days))
        .bind(doctor.shift_start)
        .bind(doctor.shift_end)
        .bind(Json(doctor.leave_days))
        .bind(Json(doctor.off_days))
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Apply a partial update. Columns not named in the patch keep their values.
    pub async fn update(&self, patch: &DoctorPatch) -> Result<(), DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE doctors SET ");
        {
            let mut set = qb.separated(", ");
            for change in patch.changes() {
                set.push(change.column());
                set.push_unseparated(" = ");
                match change {
                    DoctorChange::Name(v) | DoctorChange::Specialty(v) => {
                        set.push_bind_unseparated(v.as_str().to_owned())
                    }
                    DoctorChange::WorkDays(v) => set.push_bind_unseparated(Json(v.clone())),
                    DoctorChange::ShiftStart(v) | DoctorChange::ShiftEnd(v) => {
                        set.push_bind_unseparated(*v)
                    }
                    DoctorChange::LeaveDays(v) | DoctorChange::OffDays(v) => {
                        set.push_bind_unseparated(Json(v.clone()))
                    }
                    DoctorChange::LastOnCallDate(v) => set.push_bind_unseparated(*v),
                    DoctorChange::MandatoryRest(v) => set.push_bind_unseparated(*v),
                };
            }
            set.push("updated_at = NOW()");
        }
        qb.push(" WHERE id = ").push_bind(patch.id);

        let result = qb.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("doctor", patch.id));
        }
        Ok(())
    }

    /// Delete a doctor; their schedules go with them (ON DELETE CASCADE).
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("doctor", id));
        }
        Ok(())
    }
}
