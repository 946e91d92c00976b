//! Database layer: connection pool and repositories

pub mod pool;
pub mod repos;

pub use pool::{create_pool, ConfigError, DbConfig};
pub use repos::{BookRepo, DbError};
