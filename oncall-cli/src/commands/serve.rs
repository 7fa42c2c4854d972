//! HTTP server command
//!
//! Runs the doctor and schedule API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use oncall_server::db::{create_pool_with_options, migrations};
use oncall_server::http::{parse_origins, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ONCALL_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Allowed CORS origin, repeatable (default: localhost:3000/3030)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allow_origin: Vec<String>,

    /// Mount POST /api/setup for on-demand schema bootstrap
    #[arg(long)]
    pub enable_setup: bool,

    /// Run migrations (without sample data) before serving
    #[arg(long)]
    pub migrate: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = oncall_server::db::pool::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = super::database_url(args.database_url)?;
    let allowed_origins = parse_origins(&args.allow_origin).context("Invalid --allow-origin")?;

    tracing::info!("Starting oncall server on {}", args.bind);

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.migrate {
        migrations::setup(&pool, false)
            .await
            .context("Failed to run migrations")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        allowed_origins,
        setup_endpoint: args.enable_setup,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
