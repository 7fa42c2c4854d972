//! HTTP server layer
//!
//! Axum server with:
//! - CORS (configured origins, localhost by default)
//! - Request tracing
//! - Graceful shutdown
//! - Uniform JSON response envelopes

pub mod server;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod routes;

pub use server::{build_router, parse_origins, run_server, AppState, ServerConfig, ServerError};
pub use envelope::Envelope;
pub use error::ApiError;
