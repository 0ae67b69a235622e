// Bookrate - Book Review Catalog Service
// Copyright (C) 2026 Bookrate contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Server entry point.
//!
//! Reads the bind address and database path from the command line, the JWT
//! secret from the environment, and serves the API until interrupted.

use anyhow::Context;
use bookrate::config::{self, AuthConfig};
use bookrate::http::{router, AppState};
use bookrate::storage::Database;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bookrate-server", about = "Book review catalog API server")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = config::DEFAULT_BIND_ADDR)]
    bind: String,

    /// Path to the SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = config::DEFAULT_DATABASE_PATH)]
    database: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let auth = AuthConfig::from_env().context("reading auth configuration")?;

    let db = Database::new(&args.database)
        .await
        .with_context(|| format!("opening database at {}", args.database))?;

    let app = router(AppState { db, auth });

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!(addr = %args.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutting down");
}
