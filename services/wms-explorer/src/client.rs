//! HTTP access to WMS servers and the capabilities proxy.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use wms_protocol::getfeatureinfo::{FeatureCollection, GetFeatureInfoRequest};
use wms_protocol::requests::{GetCapabilitiesRequest, LegendGraphicRequest};

use crate::feature_info::FeatureInfoSource;

/// Capabilities endpoint of wms-proxy, relative to its base URL.
const PROXY_CAPABILITIES_PATH: &str = "proxy/getcapabilities";

/// WMS client, optionally routing capabilities requests through wms-proxy.
pub struct WmsClient {
    client: reqwest::Client,
    proxy_url: Option<String>,
}

impl WmsClient {
    pub fn new(timeout: Duration, proxy_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, proxy_url })
    }

    /// URL the capabilities document is fetched from.
    pub fn capabilities_url(&self, server_url: &str) -> Result<Url> {
        let url = match &self.proxy_url {
            Some(proxy) => Url::parse_with_params(
                &format!("{}/{}", proxy.trim_end_matches('/'), PROXY_CAPABILITIES_PATH),
                &[("url", server_url)],
            ),
            None => Url::parse_with_params(server_url, GetCapabilitiesRequest::default().to_params()),
        };
        url.with_context(|| format!("Invalid server URL: {}", server_url))
    }

    /// Fetch the raw GetCapabilities XML for a server.
    pub async fn fetch_capabilities(&self, server_url: &str) -> Result<String> {
        let url = self.capabilities_url(server_url)?;
        debug!(url = %url, "Fetching GetCapabilities");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", server_url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Server returned {}", status);
        }

        Ok(response.text().await?)
    }
}

/// GetLegendGraphic URL for a layer.
pub fn legend_url(server_url: &str, layer_name: &str) -> Result<Url> {
    Url::parse_with_params(server_url, LegendGraphicRequest::for_layer(layer_name).to_params())
        .with_context(|| format!("Invalid server URL: {}", server_url))
}

/// GetFeatureInfo URL for a request against a server.
pub fn feature_info_url(server_url: &str, request: &GetFeatureInfoRequest) -> Result<Url> {
    Url::parse_with_params(server_url, request.to_params())
        .with_context(|| format!("Invalid server URL: {}", server_url))
}

#[async_trait]
impl FeatureInfoSource for WmsClient {
    async fn feature_info(
        &self,
        server_url: &str,
        request: &GetFeatureInfoRequest,
    ) -> Result<FeatureCollection> {
        let url = feature_info_url(server_url, request)?;
        debug!(url = %url, "Fetching GetFeatureInfo");

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        FeatureCollection::from_json(&body).context("Invalid GetFeatureInfo JSON response")
    }
}
