//! GetCapabilities proxy service.
//!
//! Browsers cannot read most WMS servers' capabilities directly because of
//! CORS. This service fetches the document server-side and hands it back
//! with permissive CORS headers, optionally pre-parsed into JSON.

pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::ProxyState;

/// Build the proxy router.
pub fn create_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/proxy/getcapabilities", get(handlers::capabilities_handler))
        .route("/proxy/layers", get(handlers::layers_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
