//! Repository implementations for database access
//!
//! Patterns shared by every operation:
//! - Parameters are bound positionally, never interpolated into SQL text
//! - Mutations run inside a transaction; dropping it without commit rolls back
//! - Absence of a matched row is reported as `DbError::NotFound`, never committed

pub mod books;

pub use books::{BookRepo, DbError};
