//! Explorer configuration loaded from `config/servers.yaml`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Servers offered for selection
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
    /// Base URL of a running wms-proxy; capabilities are fetched directly when unset
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Degrees per pixel of the GetFeatureInfo query window
    #[serde(default = "default_resolution")]
    pub feature_info_resolution: f64,
}

/// A selectable WMS server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub id: String,
    pub title: String,
    pub url: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_resolution() -> f64 {
    0.01
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            proxy_url: None,
            request_timeout_secs: default_timeout(),
            feature_info_resolution: default_resolution(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ExplorerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;

        info!(
            path = %path.display(),
            servers = config.servers.len(),
            "Loaded explorer configuration"
        );
        Ok(config)
    }

    /// Load from `path` if it exists, built-in defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be > 0");
        }
        if !(self.feature_info_resolution > 0.0) {
            bail!("feature_info_resolution must be > 0");
        }
        for (i, server) in self.servers.iter().enumerate() {
            if self.servers[..i].iter().any(|s| s.id == server.id) {
                bail!("duplicate server id '{}'", server.id);
            }
        }
        Ok(())
    }

    /// Resolve a `--server` argument: a configured id or an http(s) URL.
    pub fn resolve_server(&self, id_or_url: &str) -> Result<String> {
        if let Some(server) = self.servers.iter().find(|s| s.id == id_or_url) {
            return Ok(server.url.clone());
        }
        if id_or_url.starts_with("http://") || id_or_url.starts_with("https://") {
            return Ok(id_or_url.to_string());
        }
        bail!(
            "Unknown server '{}': use a configured id or an http(s) URL",
            id_or_url
        )
    }
}
