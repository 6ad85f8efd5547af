//! Router tests against a local fake WMS server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::Query,
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower::ServiceExt;

use test_utils::fixtures::capabilities;
use wms_proxy::handlers::LayersResponse;
use wms_proxy::{create_router, ProxyState};

/// Serves `xml` for GetCapabilities requests only.
async fn spawn_upstream(xml: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/wms",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            let is_capabilities = params.get("service").map(String::as_str) == Some("WMS")
                && params.get("request").map(String::as_str) == Some("GetCapabilities")
                && params.get("version").map(String::as_str) == Some("1.3.0");
            if is_capabilities {
                ([(header::CONTENT_TYPE, "text/xml")], xml).into_response()
            } else {
                StatusCode::BAD_REQUEST.into_response()
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn proxy() -> Router {
    let state = ProxyState::new(Duration::from_secs(5), None).unwrap();
    create_router(Arc::new(state))
}

fn encoded_upstream(addr: SocketAddr) -> String {
    format!("http%3A%2F%2F{}%2Fwms", addr.to_string().replace(':', "%3A"))
}

async fn get_request(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_request(proxy(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let (status, body) = get_request(proxy(), "/proxy/getcapabilities").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("url"));
}

#[tokio::test]
async fn test_capabilities_passthrough() {
    let addr = spawn_upstream(capabilities::DEMO_WMS).await;
    let uri = format!("/proxy/getcapabilities?url={}", encoded_upstream(addr));

    let response = proxy()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/xml"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, capabilities::DEMO_WMS.as_bytes());
}

#[tokio::test]
async fn test_layers_endpoint_parses_catalog() {
    let addr = spawn_upstream(capabilities::DEMO_WMS).await;
    let uri = format!("/proxy/layers?url={}", encoded_upstream(addr));

    let (status, body) = get_request(proxy(), &uri).await;
    assert_eq!(status, StatusCode::OK);

    let layers: LayersResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(layers.service_title, "Demo WMS");
    assert_eq!(layers.count, 2);
    assert_eq!(layers.layers[0].name, "precip");
    assert_eq!(layers.layers[1].title, "Temperature");
}

#[tokio::test]
async fn test_layers_endpoint_rejects_exception_report() {
    let addr = spawn_upstream(capabilities::NO_SERVICE).await;
    let uri = format!("/proxy/layers?url={}", encoded_upstream(addr));

    let (status, body) = get_request(proxy(), &uri).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("No Service information"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // bind and drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let uri = format!("/proxy/getcapabilities?url={}", encoded_upstream(addr));
    let (status, body) = get_request(proxy(), &uri).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("error"));
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let (status, _) = get_request(proxy(), "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
