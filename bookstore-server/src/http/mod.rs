//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS (intentional default, not a security boundary)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, ServerConfig};
