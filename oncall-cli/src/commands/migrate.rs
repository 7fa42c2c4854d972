//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use oncall_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Skip inserting the sample doctors
    #[arg(long)]
    pub no_seed: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create tables and indexes, then seed unless `--no-seed`
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = super::database_url(args.database_url)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    let report = migrations::setup(&pool, !args.no_seed)
        .await
        .context("Database setup failed")?;

    tracing::info!(seeded = report.seeded, "Database setup completed successfully");
    println!("Database setup completed successfully ({} sample doctors added)", report.seeded);

    Ok(())
}
