//! Health check endpoint

use axum::{routing::get, Router};
use serde::Serialize;

use crate::http::envelope::Envelope;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> Envelope<HealthResponse> {
    Envelope::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let envelope = health().await;
        assert_eq!(envelope.code(), axum::http::StatusCode::OK);
        assert_eq!(envelope.data().map(|h| h.status), Some("ok"));
    }
}
