//! Gateway configuration
//!
//! Loadable from TOML or JSON (picked by file extension); every field has a
//! default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Forge gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Address the API server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Path of the JSON module index served by the built-in release source.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Hostname reported to the release source instead of the request `Host`
    /// header.
    #[serde(default)]
    pub hostname: Option<String>,
}

fn default_listen_addr() -> SocketAddr {
    "127.0.0.1:8015".parse().expect("default listen addr is valid")
}

fn default_index_path() -> PathBuf {
    PathBuf::from("forge-index.json")
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            index_path: default_index_path(),
            hostname: None,
        }
    }
}

impl ForgeConfig {
    /// Load configuration from file (supports JSON and TOML).
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            let config: ForgeConfig = toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))?;
            Ok(config)
        } else {
            let config: ForgeConfig = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e))?;
            Ok(config)
        }
    }
}
