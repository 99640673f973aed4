//! Runtime configuration.
//!
//! Every setting can come from a command-line flag or from a `LOGICLAB_*`
//! environment variable; `.env` files are loaded into the environment by
//! `main` before parsing.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// LogicLab employee records API
#[derive(Debug, Clone, Parser)]
#[command(name = "logiclab-server", version)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "LOGICLAB_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to.
    #[arg(long, env = "LOGICLAB_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path prefix every route is mounted under.
    #[arg(long, env = "LOGICLAB_BASE_PATH", default_value = "/api")]
    pub base_path: String,

    /// SQLite database file. An in-memory store is used when unset.
    #[arg(long, env = "LOGICLAB_DATABASE", value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "LOGICLAB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files. Logs go to stderr only when unset.
    #[arg(long, env = "LOGICLAB_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the base path with one leading `/` and no trailing `/`.
    ///
    /// The root prefix is returned as an empty string.
    pub fn normalized_base_path(&self) -> String {
        normalize_base_path(&self.base_path)
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(logiclab_core::default_log_level())
    }
}

fn normalize_base_path(raw: &str) -> String {
    let segments = raw
        .split('/')
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>();

    if segments.is_empty() {
        return String::new();
    }

    format!("/{}", segments.join("/"))
}
