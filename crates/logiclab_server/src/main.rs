//! `logiclab-server` binary.

use anyhow::{anyhow, Context};
use clap::Parser;
use logiclab_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing `.env` is fine; explicit flags and real env vars still apply.
    let env_file_loaded = dotenvy::dotenv().is_ok();

    let config = ServerConfig::parse();
    let log_dir = config
        .log_dir
        .as_deref()
        .map(|dir| dir.to_str().context("log directory must be valid UTF-8"))
        .transpose()?;
    logiclab_core::init_logging(config.log_level(), log_dir)
        .map_err(|err| anyhow!(err))
        .context("initialize logging")?;

    log::debug!("event=config_load module=server status=ok env_file={env_file_loaded}");

    logiclab_server::run(config).await.context("run server")
}
