//! WmsClient against a local fake WMS server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};

use layer_session::LayerSession;
use test_utils::fixtures::{capabilities, feature_info};
use wms_explorer::{query_feature_info, WmsClient};

async fn wms_handler(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
    let request = params
        .get("request")
        .or_else(|| params.get("REQUEST"))
        .cloned()
        .unwrap_or_default();

    match request.as_str() {
        "GetCapabilities" => {
            ([(header::CONTENT_TYPE, "text/xml")], capabilities::DEMO_WMS).into_response()
        }
        "GetFeatureInfo" => match params.get("QUERY_LAYERS").map(String::as_str) {
            Some("precip") => (
                [(header::CONTENT_TYPE, "application/json")],
                feature_info::DISTRICTS,
            )
                .into_response(),
            Some("temp") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            _ => feature_info::EMPTY.into_response(),
        },
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn_wms() -> SocketAddr {
    let app = Router::new()
        .route("/wms", get(wms_handler))
        .route("/broken", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client() -> WmsClient {
    WmsClient::new(Duration::from_secs(5), None).unwrap()
}

#[tokio::test]
async fn test_fetch_capabilities_direct() {
    let addr = spawn_wms().await;
    let xml = client()
        .fetch_capabilities(&format!("http://{}/wms", addr))
        .await
        .unwrap();
    assert_eq!(xml, capabilities::DEMO_WMS);
}

#[tokio::test]
async fn test_fetch_capabilities_error_status() {
    let addr = spawn_wms().await;
    let err = client()
        .fetch_capabilities(&format!("http://{}/broken", addr))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Server returned 503"));
}

#[tokio::test]
async fn test_feature_info_over_session() {
    let addr = spawn_wms().await;
    let server_url = format!("http://{}/wms", addr);
    let wms = client();

    let xml = wms.fetch_capabilities(&server_url).await.unwrap();
    let mut session = LayerSession::new();
    session.load_capabilities(server_url.as_str(), &xml).unwrap();
    session.activate("temp", "Temperature").unwrap();
    session.activate("precip", "Precipitation").unwrap();

    let report = query_feature_info(&wms, &session, 20.0, 30.0, 0.01).await;

    // temp fails upstream and is left out
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].layer_title, "Precipitation");
    assert!(report.to_text().contains("Krishna"));
}
