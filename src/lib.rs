pub mod audit;
pub mod calendar;
mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod roles;
pub mod schedule;
pub mod state;
pub mod stats;
#[cfg(test)]
mod test_utils;
pub mod validation;

pub use commands::router;

use crate::audit::AuditLog;
use crate::config::{Config, ConfigError};
use crate::db::{migrations, Database};
use crate::roles::RoleDirectory;
use crate::state::AppState;
use log::{error, info, warn};
use std::sync::{Arc, Mutex};

/// Error type for startup failures
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to open database: {0}")]
    DatabaseOpen(rusqlite::Error),

    #[error("Failed to run database migrations: {0}")]
    Migration(rusqlite::Error),

    #[error("Failed to bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("Server error: {0}")]
    Serve(std::io::Error),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

fn open_database(config: &Config) -> Result<Database, InitError> {
    let path = config.resolve_database_path()?;
    info!("Using database at {}", path.display());
    Database::open(&path).map_err(InitError::DatabaseOpen)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Run the HTTP API until interrupted. Pending audit entries are written before returning.
pub async fn serve(config: Config) -> Result<(), InitError> {
    let db = open_database(&config)?;
    migrations::run(db.connection()).map_err(InitError::Migration)?;

    let roles = RoleDirectory::new(config.owner_email.as_deref(), config.ea_email.as_deref());
    if roles.is_empty() {
        warn!("No owner or EA email configured; every request will be rejected");
    }
    if config.calendars.is_empty() {
        info!("No calendars configured");
    }

    let db = Arc::new(Mutex::new(db));
    let (audit, worker) = AuditLog::spawn(Arc::clone(&db));
    let state = AppState::new(db, audit.clone(), roles, config.calendars.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|source| InitError::Bind {
            addr: config.bind.clone(),
            source,
        })?;
    info!("weekplan listening on http://{}", config.bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InitError::Serve)?;

    tokio::task::spawn_blocking(move || {
        audit.flush();
        drop(audit);
        worker.join();
    })
    .await
    .map_err(|e| InitError::Shutdown(e.to_string()))
}

/// Seed the template week. Without `force` a populated template is left as is.
/// Returns the number of blocks inserted.
pub fn seed(config: &Config, force: bool) -> Result<usize, InitError> {
    let db = open_database(config)?;
    migrations::reseed(db.connection(), force).map_err(InitError::Migration)
}
