//! HTTP entry point for the LogicLab employee service.
//!
//! Wires the database handle, the employee service and the axum router
//! together, then serves until a shutdown signal arrives.

mod config;
mod error;
mod http;
mod signal;

pub use config::ServerConfig;
pub use error::ApiError;
pub use http::{router, AppState};

use anyhow::Context;
use log::info;
use logiclab_core::Database;

/// Opens the store configured by `config`.
pub fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    match config.database.as_deref() {
        Some(path) => Database::open(path)
            .with_context(|| format!("open database `{}`", path.display())),
        None => Database::open_in_memory().context("open in-memory database"),
    }
}

/// Runs the HTTP server until SIGINT/SIGTERM.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let database = open_database(&config)?;
    let base_path = config.normalized_base_path();
    let app = router(AppState::new(database), &base_path);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    let local_addr = listener.local_addr().context("read listener address")?;

    info!(
        "event=server_start module=server status=ok addr={local_addr} url=http://localhost:{}{base_path}",
        local_addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(signal::shutdown())
        .await
        .context("serve HTTP")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{open_database, ServerConfig};
    use clap::Parser;

    #[test]
    fn open_database_uses_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logiclab.db");
        let config = ServerConfig::try_parse_from([
            "logiclab-server",
            "--database",
            path.to_str().unwrap(),
        ])
        .unwrap();

        open_database(&config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn open_database_reports_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("logiclab.db");
        let config = ServerConfig::try_parse_from([
            "logiclab-server",
            "--database",
            path.to_str().unwrap(),
        ])
        .unwrap();

        let err = open_database(&config).unwrap_err();
        assert!(err.to_string().starts_with("open database"));
    }
}
