//! Shared proxy state.

use std::time::Duration;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

/// State shared by all request handlers.
pub struct ProxyState {
    pub client: reqwest::Client,
    /// Prometheus handle, absent when no recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl ProxyState {
    /// Create the upstream HTTP client with the given request timeout.
    pub fn new(timeout: Duration, metrics: Option<PrometheusHandle>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        info!(timeout_secs = timeout.as_secs(), "Upstream HTTP client ready");

        Ok(Self { client, metrics })
    }
}
