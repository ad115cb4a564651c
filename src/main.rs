//! Forge gateway binary
//!
//! Usage: `forge-gateway [config-file]`. Without an argument the defaults
//! apply (listen on 127.0.0.1:8015, serve `forge-index.json`).

use anyhow::Result;
use forge_gateway::{ForgeApiServer, ForgeConfig, LocalIndexSource};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ForgeConfig::from_file(Path::new(&path))?,
        None => ForgeConfig::default(),
    };
    info!(addr = %config.listen_addr, index = %config.index_path.display(), "starting forge gateway");

    let source = Arc::new(LocalIndexSource::from_file(&config.index_path)?);

    let mut server = ForgeApiServer::new(config.listen_addr, source);
    if let Some(hostname) = &config.hostname {
        server = server.with_hostname(hostname);
    }
    server.start().await
}
