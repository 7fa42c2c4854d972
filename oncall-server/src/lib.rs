//! oncall-server: doctor and on-call schedule API
//!
//! CRUD over doctors and their schedules on PostgreSQL, served over HTTP
//! with a uniform `{status, message, data}` response envelope. Creating a
//! schedule places the doctor on mandatory rest in the same transaction.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, DbError};
pub use http::{build_router, run_server, ServerConfig};
