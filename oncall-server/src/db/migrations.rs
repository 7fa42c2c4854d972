//! Schema bootstrap and sample data
//!
//! Safe to re-run: tables and indexes are created only when absent and
//! sample doctors are inserted only when no doctor with the same name and
//! specialty exists.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use super::DbError;

/// Sample doctor inserted by [`seed`]
struct SeedDoctor {
    name: &'static str,
    specialty: &'static str,
    work_days: [u8; 5],
    shift_start: &'static str,
    shift_end: &'static str,
}

const SEED_DOCTORS: [SeedDoctor; 3] = [
    SeedDoctor {
        name: "Dr. Smith",
        specialty: "Emergency Medicine",
        work_days: [1, 2, 3, 4, 5],
        shift_start: "08:00:00",
        shift_end: "17:00:00",
    },
    SeedDoctor {
        name: "Dr. Johnson",
        specialty: "Internal Medicine",
        work_days: [1, 2, 3, 4, 5],
        shift_start: "08:00:00",
        shift_end: "17:00:00",
    },
    SeedDoctor {
        name: "Dr. Williams",
        specialty: "Surgery",
        work_days: [2, 3, 4, 5, 6],
        shift_start: "07:00:00",
        shift_end: "18:00:00",
    },
];

/// Transaction-scoped advisory lock held by [`setup`]; "oncall" in ASCII.
const SETUP_LOCK_KEY: i64 = 0x6f6e_6361_6c6c;

/// Outcome of [`setup`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub seeded: u64,
}

/// Create tables, run the seed if requested, all in one transaction.
///
/// Concurrent callers (replicas started with `--migrate`, repeated
/// `POST /api/setup`) queue on an advisory lock, since PostgreSQL does not
/// serialize `CREATE TABLE IF NOT EXISTS` against itself.
pub async fn setup(pool: &PgPool, with_seed: bool) -> Result<SetupReport, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SETUP_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    run(&mut tx).await?;
    let seeded = if with_seed { seed(&mut tx).await? } else { 0 };

    tx.commit().await?;
    Ok(SetupReport { seeded })
}

/// Create both tables and their indexes.
pub async fn run(conn: &mut PgConnection) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            specialty VARCHAR(255) NOT NULL,
            work_days JSONB NOT NULL,
            shift_start TIME NOT NULL,
            shift_end TIME NOT NULL,
            leave_days JSONB DEFAULT '[]'::jsonb,
            off_days JSONB DEFAULT '[]'::jsonb,
            last_on_call_date DATE,
            is_on_mandatory_rest BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id BIGSERIAL PRIMARY KEY,
            doctor_id BIGINT NOT NULL REFERENCES doctors(id) ON DELETE CASCADE,
            schedule_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_schedule UNIQUE (doctor_id, schedule_date)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    create_indexes(conn).await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

async fn create_indexes(conn: &mut PgConnection) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_doctors_name ON doctors(name)")
        .execute(&mut *conn)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_schedules_date ON schedules(schedule_date, start_time)",
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Insert the sample doctors that are not already present.
///
/// Returns the number of rows inserted.
pub async fn seed(conn: &mut PgConnection) -> Result<u64, DbError> {
    let mut inserted = 0;

    for doctor in &SEED_DOCTORS {
        let result = sqlx::query(
            r#"
            INSERT INTO doctors
                (name, specialty, work_days, shift_start, shift_end, leave_days, off_days)
            SELECT $1, $2, $3, $4::time, $5::time, '[]'::jsonb, '[]'::jsonb
            WHERE NOT EXISTS (
                SELECT 1 FROM doctors WHERE name = $1 AND specialty = $2
            )
            "#,
        )
        .bind(doctor.name)
        .bind(doctor.specialty)
        .bind(Json(doctor.work_days))
        .bind(doctor.shift_start)
        .bind(doctor.shift_end)
        .execute(&mut *conn)
        .await?;

        inserted += result.rows_affected();
    }

    if inserted > 0 {
        tracing::info!(count = inserted, "Seeded sample doctors");
    } else {
        tracing::debug!("Sample doctors already present");
    }
    Ok(inserted)
}
