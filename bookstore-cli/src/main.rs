//! bookstore - HTTP server for the book catalog
//!
//! Reads database settings from the environment (optionally via a local
//! .env file), opens the connection pool, and serves the CRUD API until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use bookstore_server::db::{create_pool, DbConfig};
use bookstore_server::http::{run_server, ServerConfig};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "bookstore",
    version,
    about = "CRUD API server for the book catalog"
)]
struct Cli {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Enable debug logging (RUST_LOG takes precedence if set)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.debug)?;

    let config = DbConfig::from_env().context("invalid database configuration")?;
    let pool = create_pool(&config)
        .await
        .context("failed to connect to database")?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Successfully connected to database"
    );

    run_server(pool, ServerConfig { bind_addr: cli.bind })
        .await
        .context("server error")?;

    Ok(())
}
