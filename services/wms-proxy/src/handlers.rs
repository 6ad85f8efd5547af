//! HTTP handlers for the proxy endpoints.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use wms_common::LayerSummary;
use wms_protocol::capabilities::CapabilitiesDocument;
use wms_protocol::requests::GetCapabilitiesRequest;

use crate::state::ProxyState;

#[derive(Debug, Deserialize)]
pub struct CapabilitiesQuery {
    /// WMS base URL, without request parameters
    pub url: Option<String>,
}

/// Parsed catalog returned by `/proxy/layers`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LayersResponse {
    pub service_title: String,
    pub service_abstract: String,
    pub count: usize,
    pub layers: Vec<LayerSummary>,
}

/// Raw upstream answer.
struct Upstream {
    status: StatusCode,
    body: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn require_url(query: CapabilitiesQuery) -> Result<String, Response> {
    match query.url.map(|u| u.trim().to_string()) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Missing required parameter: url",
        )),
    }
}

async fn fetch_capabilities(state: &ProxyState, url: &str) -> Result<Upstream, Response> {
    let params = GetCapabilitiesRequest::default().to_params();

    let result = async {
        let response = state.client.get(url).query(&params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok::<_, reqwest::Error>((status, body))
    }
    .await;

    match result {
        Ok((status, body)) => {
            info!(url = %url, status = status, bytes = body.len(), "Fetched GetCapabilities");
            Ok(Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            })
        }
        Err(e) => {
            counter!("proxy_upstream_errors_total").increment(1);
            warn!(url = %url, error = %e, "Upstream request failed");
            Err(error_response(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// GET /proxy/getcapabilities?url=... - raw capabilities XML
pub async fn capabilities_handler(
    Extension(state): Extension<Arc<ProxyState>>,
    Query(query): Query<CapabilitiesQuery>,
) -> Response {
    counter!("proxy_requests_total", "endpoint" => "getcapabilities").increment(1);

    let url = match require_url(query) {
        Ok(url) => url,
        Err(response) => return response,
    };

    match fetch_capabilities(&state, &url).await {
        Ok(upstream) => (
            upstream.status,
            [(header::CONTENT_TYPE, "application/xml")],
            upstream.body,
        )
            .into_response(),
        Err(response) => response,
    }
}

/// GET /proxy/layers?url=... - capabilities parsed into a layer list
pub async fn layers_handler(
    Extension(state): Extension<Arc<ProxyState>>,
    Query(query): Query<CapabilitiesQuery>,
) -> Response {
    counter!("proxy_requests_total", "endpoint" => "layers").increment(1);

    let url = match require_url(query) {
        Ok(url) => url,
        Err(response) => return response,
    };

    let upstream = match fetch_capabilities(&state, &url).await {
        Ok(upstream) => upstream,
        Err(response) => return response,
    };

    if !upstream.status.is_success() {
        return error_response(
            StatusCode::BAD_GATEWAY,
            format!("Server returned {}", upstream.status),
        );
    }

    match CapabilitiesDocument::parse(&upstream.body) {
        Ok(doc) => {
            debug!(url = %url, layers = doc.layer_count(), "Parsed capabilities");
            Json(LayersResponse {
                count: doc.layer_count(),
                layers: doc.layer_summaries(),
                service_title: doc.service_title,
                service_abstract: doc.service_abstract,
            })
            .into_response()
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Capabilities document rejected");
            let status = StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
            error_response(status, e.to_string())
        }
    }
}

/// GET /health
pub async fn health_handler() -> &'static str {
    "OK"
}

/// GET /metrics - Prometheus exposition
pub async fn metrics_handler(Extension(state): Extension<Arc<ProxyState>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
