//! Application state shared across handlers
//!
//! The pool is the only shared mutable resource; handlers reach the
//! catalog through [`AppState::books`] and never hold a connection
//! across requests.

use sqlx::PgPool;
use std::sync::Arc;

use crate::db::BookRepo;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool }),
        }
    }

    /// Raw pool handle, used by the health check and shutdown.
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Book repository borrowing the shared pool.
    pub fn books(&self) -> BookRepo<'_> {
        BookRepo::new(&self.inner.pool)
    }
}
