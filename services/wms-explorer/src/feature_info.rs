//! Concurrent GetFeatureInfo over the visible layers of a session.

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use layer_session::LayerSession;
use wms_protocol::getfeatureinfo::{
    FeatureCollection, FeatureInfoReport, GetFeatureInfoRequest, LayerFeatureInfo,
};

/// Anything that can answer a GetFeatureInfo request.
#[async_trait]
pub trait FeatureInfoSource: Send + Sync {
    async fn feature_info(
        &self,
        server_url: &str,
        request: &GetFeatureInfoRequest,
    ) -> Result<FeatureCollection>;
}

/// Query every visible layer at (lon, lat) and aggregate the results.
///
/// Requests run concurrently. Results keep the active layer order; layers
/// that fail or return no features are left out of the report.
pub async fn query_feature_info<S: FeatureInfoSource + ?Sized>(
    source: &S,
    session: &LayerSession,
    lon: f64,
    lat: f64,
    resolution: f64,
) -> FeatureInfoReport {
    let server_url = session.server_url();

    let requests = session.visible_layers().map(|layer| {
        let request = GetFeatureInfoRequest::at_point(layer.name.as_str(), lon, lat, resolution);
        let name = layer.name.as_str();
        let title = layer.title.clone();
        async move {
            match source.feature_info(server_url, &request).await {
                Ok(collection) => {
                    debug!(
                        layer = %name,
                        features = collection.features.len(),
                        "GetFeatureInfo answered"
                    );
                    Some(LayerFeatureInfo {
                        layer_title: title,
                        features: collection.features,
                    })
                }
                Err(e) => {
                    warn!(layer = %name, error = %e, "GetFeatureInfo failed");
                    None
                }
            }
        }
    });

    let results = join_all(requests).await.into_iter().flatten().collect();
    FeatureInfoReport::new(results)
}
