//! On-demand schema bootstrap
//!
//! Only mounted when `ServerConfig::setup_endpoint` is set.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Router};

use super::method_not_allowed;
use crate::db::migrations::{self, SetupReport};
use crate::http::envelope::Envelope;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// POST /setup - create tables and seed sample doctors
async fn run_setup(State(state): State<Arc<AppState>>) -> Result<Envelope<SetupReport>, ApiError> {
    let report = migrations::setup(&state.pool, true).await?;

    tracing::info!(seeded = report.seeded, "database setup via HTTP");
    Ok(Envelope::send(
        report,
        StatusCode::OK,
        "Database setup completed successfully",
    ))
}

/// Setup routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/setup", post(run_setup).fallback(method_not_allowed))
}
