//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - Connection pool owned by the caller and passed in, no global handle
//! - Every value is a bound parameter; column names come from closed enums
//! - Constraint violations are mapped to domain errors, not leaked
//! - Transactions for multi-step operations

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
