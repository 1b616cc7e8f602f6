//! Persistence layer for estimation requests.
//!
//! Owns store configuration, the connection pool, schema bootstrap and the
//! repository that reads and writes `estimation_requests`.

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod repositories;

pub use config::{DatabaseConfig, DbBackend};
pub use error::DbError;
pub use pool::{create_pool, health_check, initialize_schema, DbPool, Session};
