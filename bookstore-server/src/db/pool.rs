//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is the only
//! shared mutable resource in the service: every statement borrows a
//! connection from it and hands the connection back on drop.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Connections opened eagerly at startup.
const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Maximum connections ever on loan at once.
const DEFAULT_MAX_CONNECTIONS: u32 = 25;

/// Upper bound on how long a request waits for an idle connection
/// before failing with `PoolTimedOut` (surfaced as 503).
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid DB_PORT value: '{value}'")]
    InvalidPort { value: String },
}

/// Postgres connection settings, sourced from the environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "bookstore".to_string(),
            user: "bookstore_user".to_string(),
            password: "bookstore_password".to_string(),
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DbConfig {
    /// Load settings from `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and
    /// `DB_PASSWORD`, falling back to the defaults above.
    ///
    /// # Errors
    ///
    /// Returns an error if `DB_PORT` is set but not a valid port number,
    /// so a typo fails at startup instead of connecting to the default
    /// port.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let port = match std::env::var("DB_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            Err(_) => defaults.port,
        };
        Ok(Self {
            host: env_or("DB_HOST", defaults.host),
            port,
            database: env_or("DB_NAME", defaults.database),
            user: env_or("DB_USER", defaults.user),
            password: env_or("DB_PASSWORD", defaults.password),
            min_connections: defaults.min_connections,
            max_connections: defaults.max_connections,
        })
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Create a PostgreSQL connection pool.
///
/// Opens `min_connections` eagerly and verifies the pool with a trivial
/// round trip before declaring it usable, so a misconfigured store fails
/// the process at startup rather than on the first request.
///
/// # Errors
///
/// Returns an error if the store is unreachable, credentials are
/// rejected, or the verification round trip fails.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(config.connect_options())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}
