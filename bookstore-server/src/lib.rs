//! bookstore-server: CRUD HTTP service over a single `books` table
//!
//! Exposes list/get/create/update/delete for the book catalog plus a
//! database-backed health check. All statement execution goes through
//! a bounded Postgres connection pool.

pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use state::AppState;
