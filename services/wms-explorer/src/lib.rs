//! Command line front end for exploring WMS servers.
//!
//! Stands in for the browser UI: it fetches capabilities (directly or
//! through `wms-proxy`), drives a [`layer_session::LayerSession`] and fans
//! GetFeatureInfo requests out over the visible layers.

pub mod client;
pub mod config;
pub mod feature_info;

pub use client::WmsClient;
pub use config::{ExplorerConfig, ServerConfig};
pub use feature_info::{query_feature_info, FeatureInfoSource};
