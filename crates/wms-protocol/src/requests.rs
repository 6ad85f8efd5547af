//! Query parameter builders for the WMS requests the explorer issues.
//!
//! Builders only produce key/value pairs. Joining them onto a server URL
//! (and percent-encoding) is left to the HTTP client.

/// Protocol version requested from servers.
pub const WMS_VERSION: &str = "1.3.0";

/// Query parameters as ordered key/value pairs.
pub type QueryParams = Vec<(&'static str, String)>;

/// GetCapabilities request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCapabilitiesRequest {
    pub version: String,
}

impl Default for GetCapabilitiesRequest {
    fn default() -> Self {
        Self {
            version: WMS_VERSION.to_string(),
        }
    }
}

impl GetCapabilitiesRequest {
    pub fn to_params(&self) -> QueryParams {
        vec![
            ("service", "WMS".to_string()),
            ("request", "GetCapabilities".to_string()),
            ("version", self.version.clone()),
        ]
    }
}

/// Source parameters for a tiled GetMap layer on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayerParams {
    pub layers: String,
    pub tiled: bool,
}

impl TileLayerParams {
    pub fn for_layer(layer_name: impl Into<String>) -> Self {
        Self {
            layers: layer_name.into(),
            tiled: true,
        }
    }

    pub fn to_params(&self) -> QueryParams {
        vec![
            ("LAYERS", self.layers.clone()),
            ("TILED", self.tiled.to_string()),
        ]
    }
}

/// GetLegendGraphic request for the legend panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendGraphicRequest {
    pub layer: String,
    pub format: String,
}

impl LegendGraphicRequest {
    pub fn for_layer(layer_name: impl Into<String>) -> Self {
        Self {
            layer: layer_name.into(),
            format: "image/png".to_string(),
        }
    }

    pub fn to_params(&self) -> QueryParams {
        vec![
            ("REQUEST", "GetLegendGraphic".to_string()),
            ("VERSION", "1.0.0".to_string()),
            ("FORMAT", self.format.clone()),
            ("LAYER", self.layer.clone()),
        ]
    }
}
