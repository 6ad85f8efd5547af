//! OGC WMS client-side protocol support.
//!
//! Supports:
//! - GetCapabilities parsing (WMS 1.3.0 and 1.1.1 documents)
//! - GetMap tile, GetLegendGraphic and GetFeatureInfo request parameters
//! - GeoJSON GetFeatureInfo responses

pub mod capabilities;
pub mod getfeatureinfo;
pub mod requests;

pub use capabilities::{layer_info, parse, select_bounding_box, CapabilitiesDocument, UNKNOWN_SERVICE};
pub use getfeatureinfo::{
    Feature, FeatureCollection, FeatureInfoReport, GetFeatureInfoRequest, InfoFormat,
    LayerFeatureInfo,
};
pub use requests::{GetCapabilitiesRequest, LegendGraphicRequest, QueryParams, TileLayerParams};
