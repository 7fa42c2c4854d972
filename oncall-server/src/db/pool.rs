//! PostgreSQL pool shared by the doctor and schedule repositories
//!
//! The connection string is always handed in by the caller (the CLI reads
//! it from `DATABASE_URL`), so no credentials live in this crate.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Pool size used by `oncall migrate` and by `serve` unless overridden.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// A request waiting longer than this for a connection fails with 500.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shown in `pg_stat_activity`.
const APPLICATION_NAME: &str = "oncall";

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect eagerly so a bad `DATABASE_URL` fails at startup, not on the
/// first request. A `max_connections` of zero is raised to one.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let connect: PgConnectOptions = database_url.parse()?;

    pool_options(max_connections)
        .connect_with(connect.application_name(APPLICATION_NAME))
        .await
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
}
