//! Schedule repository
//!
//! Handles schedule CRUD with:
//! - Atomic creation together with the doctor's mandatory-rest update
//! - JOIN with doctors for listing (no N+1)
//! - Unique (doctor_id, schedule_date) violations reported as conflicts

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{NewSchedule, ScheduleChange, ScheduleFilter, SchedulePatch};

/// Client-facing message for a second schedule on the same day
pub const DUPLICATE_SCHEDULE: &str = "Schedule already exists for this doctor on this date";

/// Schedule record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: i64,
    pub doctor_id: i64,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Schedule joined with the assigned doctor's name and specialty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ScheduleWithDoctor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub schedule: Schedule,
    pub doctor_name: String,
    pub specialty: String,
}

/// Schedule repository
pub struct ScheduleRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ScheduleRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List schedules, optionally filtered by date and/or doctor,
    /// ordered by date then start time.
    pub async fn list(&self, filter: ScheduleFilter) -> Result<Vec<ScheduleWithDoctor>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT s.id, s.doctor_id, s.schedule_date, s.start_time, s.end_time,
                   s.created_at, s.updated_at,
                   d.name AS doctor_name, d.specialty
            FROM schedules s
            JOIN doctors d ON s.doctor_id = d.id
            "#,
        );

        let mut keyword = " WHERE ";
        if let Some(date) = filter.date {
            qb.push(keyword).push("s.schedule_date = ").push_bind(date);
            keyword = " AND ";
        }
        if let Some(doctor_id) = filter.doctor_id {
            qb.push(keyword).push("s.doctor_id = ").push_bind(doctor_id);
        }
        qb.push(" ORDER BY s.schedule_date, s.start_time, s.id");

        let rows = qb
            .build_query_as::<ScheduleWithDoctor>()
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a schedule and put the doctor on mandatory rest (atomic).
    ///
    /// The doctor row is locked for the duration of the transaction, so
    /// concurrent requests for the same doctor see each other's inserts
    /// and the loser gets `Conflict` rather than a raw constraint error.
    pub async fn create(&self, new: NewSchedule) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        let doctor: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM doctors WHERE id = $1 FOR UPDATE")
                .bind(new.doctor_id)
                .fetch_optional(&mut *tx)
                .await?;

        if doctor.is_none() {
            return Err(DbError::not_found("doctor", new.doctor_id));
        }

        let taken: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM schedules WHERE doctor_id = $1 AND schedule_date = $2)",
        )
        .bind(new.doctor_id)
        .bind(new.schedule_date)
        .fetch_one(&mut *tx)
        .await?;

        if taken.0 {
            return Err(DbError::Conflict {
                message: DUPLICATE_SCHEDULE.to_owned(),
            });
        }

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO schedules (doctor_id, schedule_date, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new.doctor_id)
        .bind(new.schedule_date)
        .bind(new.start_time)
        .bind(new.end_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, new.doctor_id))?;

        sqlx::query(
            r#"
            UPDATE doctors
            SET last_on_call_date = $1, is_on_mandatory_rest = TRUE, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(new.schedule_date)
        .bind(new.doctor_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            schedule_id = id,
            doctor_id = new.doctor_id,
            date = %new.schedule_date,
            "schedule created, doctor placed on mandatory rest"
        );
        Ok(id)
    }

    /// Apply a partial update to a schedule.
    pub async fn update(&self, patch: &SchedulePatch) -> Result<(), DbError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE schedules SET ");
        let mut target_doctor = None;
        {
            let mut set = qb.separated(", ");
            for change in patch.changes() {
                set.push(change.column());
                set.push_unseparated(" = ");
                match change {
                    ScheduleChange::DoctorId(v) => {
                        target_doctor = Some(*v);
                        set.push_bind_unseparated(*v)
                    }
                    ScheduleChange::ScheduleDate(v) => set.push_bind_unseparated(*v),
                    ScheduleChange::StartTime(v) | ScheduleChange::EndTime(v) => {
                        set.push_bind_unseparated(*v)
                    }
                };
            }
            set.push("updated_at = NOW()");
        }
        qb.push(" WHERE id = ").push_bind(patch.id);

        let result = qb
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| classify_write_error(e, target_doctor.unwrap_or_default()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("schedule", patch.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("schedule", id));
        }
        Ok(())
    }
}

/// Map constraint violations on schedule writes to domain errors.
fn classify_write_error(err: sqlx::Error, doctor_id: i64) -> DbError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DbError::Conflict {
                message: DUPLICATE_SCHEDULE.to_owned(),
            };
        }
        if db.is_foreign_key_violation() {
            return DbError::not_found("doctor", doctor_id);
        }
    }
    DbError::Sqlx(err)
}
