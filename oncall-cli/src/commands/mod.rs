//! Command implementations for the oncall CLI

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Resolve the connection string from the flag or environment.
fn database_url(arg: Option<String>) -> Result<String> {
    arg.or_else(|| std::env::var("DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")
}
