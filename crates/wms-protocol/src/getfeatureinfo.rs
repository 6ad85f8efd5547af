//! WMS GetFeatureInfo handling
//!
//! Builds OGC WMS 1.3.0 GetFeatureInfo requests for a map location and
//! aggregates the GeoJSON answers of several layers into one report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::requests::{QueryParams, WMS_VERSION};
use wms_common::CRS84;

/// Pixel size of the query window sent to the server.
const QUERY_WINDOW: u32 = 101;

/// Shown when no layer had anything at the clicked location.
pub const NO_FEATURES_MESSAGE: &str = "No feature information found at this location";

/// GetFeatureInfo request parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GetFeatureInfoRequest {
    /// Layers to display (same as GetMap)
    pub layers: Vec<String>,
    /// Layers to query for information
    pub query_layers: Vec<String>,
    /// Coordinate reference system
    pub crs: String,
    /// Bounding box [min_lon, min_lat, max_lon, max_lat]
    pub bbox: [f64; 4],
    /// Map width in pixels
    pub width: u32,
    /// Map height in pixels
    pub height: u32,
    /// Pixel column (X coordinate, 0-based from left)
    pub i: u32,
    /// Pixel row (Y coordinate, 0-based from top)
    pub j: u32,
    /// Response format
    pub info_format: InfoFormat,
    /// Maximum number of features to return
    pub feature_count: Option<u32>,
}

impl GetFeatureInfoRequest {
    /// Query a single layer at a lon/lat location.
    ///
    /// Builds a square `CRS:84` window of `resolution` degrees per pixel
    /// centred on the point, with the query pixel in the middle.
    pub fn at_point(layer: impl Into<String>, lon: f64, lat: f64, resolution: f64) -> Self {
        let layer = layer.into();
        let half = resolution * QUERY_WINDOW as f64 / 2.0;
        let center = QUERY_WINDOW / 2;

        Self {
            layers: vec![layer.clone()],
            query_layers: vec![layer],
            crs: CRS84.to_string(),
            bbox: [lon - half, lat - half, lon + half, lat + half],
            width: QUERY_WINDOW,
            height: QUERY_WINDOW,
            i: center,
            j: center,
            info_format: InfoFormat::Json,
            feature_count: None,
        }
    }

    /// Geographic location of the queried pixel centre.
    pub fn query_point(&self) -> (f64, f64) {
        pixel_to_geographic(self.i, self.j, self.width, self.height, self.bbox)
    }

    pub fn to_params(&self) -> QueryParams {
        let [min_x, min_y, max_x, max_y] = self.bbox;
        let mut params = vec![
            ("SERVICE", "WMS".to_string()),
            ("VERSION", WMS_VERSION.to_string()),
            ("REQUEST", "GetFeatureInfo".to_string()),
            ("FORMAT", "image/png".to_string()),
            ("LAYERS", self.layers.join(",")),
            ("QUERY_LAYERS", self.query_layers.join(",")),
            ("STYLES", String::new()),
            ("CRS", self.crs.clone()),
            ("BBOX", format!("{},{},{},{}", min_x, min_y, max_x, max_y)),
            ("WIDTH", self.width.to_string()),
            ("HEIGHT", self.height.to_string()),
            ("I", self.i.to_string()),
            ("J", self.j.to_string()),
            ("INFO_FORMAT", self.info_format.to_mime().to_string()),
        ];
        if let Some(count) = self.feature_count {
            params.push(("FEATURE_COUNT", count.to_string()));
        }
        params
    }
}

/// Supported GetFeatureInfo response formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum InfoFormat {
    /// application/json - GeoJSON feature collection
    #[serde(rename = "application/json")]
    #[default]
    Json,
    /// text/html - Human-readable HTML for popups
    #[serde(rename = "text/html")]
    Html,
    /// text/xml - OGC-compliant XML
    #[serde(rename = "text/xml")]
    Xml,
    /// text/plain - Simple text format
    #[serde(rename = "text/plain")]
    Text,
}

impl InfoFormat {
    /// Parse from MIME type string
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "application/json" => Some(InfoFormat::Json),
            "text/html" => Some(InfoFormat::Html),
            "text/xml" => Some(InfoFormat::Xml),
            "text/plain" => Some(InfoFormat::Text),
            _ => None,
        }
    }

    /// Get MIME type string
    pub fn to_mime(&self) -> &'static str {
        match self {
            InfoFormat::Json => "application/json",
            InfoFormat::Html => "text/html",
            InfoFormat::Xml => "text/xml",
            InfoFormat::Text => "text/plain",
        }
    }
}

/// GeoJSON answer to a GetFeatureInfo request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A single GeoJSON feature. Geometry is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Attribute key/value pairs with values rendered for display.
    pub fn attributes(&self) -> Vec<(&str, String)> {
        self.properties
            .iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), display_value(value)))
            .collect()
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Features found for one layer at the queried location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFeatureInfo {
    /// Layer title as shown in the active layer list
    pub layer_title: String,
    pub features: Vec<Feature>,
}

/// Feature information aggregated over all queried layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfoReport {
    pub results: Vec<LayerFeatureInfo>,
}

impl FeatureInfoReport {
    /// Build a report, dropping layers that returned no features.
    pub fn new(results: Vec<LayerFeatureInfo>) -> Self {
        Self {
            results: results
                .into_iter()
                .filter(|result| !result.features.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as HTML for popup display
    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return format!("<p class=\"text-muted\">{}</p>", NO_FEATURES_MESSAGE);
        }

        let mut html = String::from("<div class=\"feature-info\">\n");

        for result in &self.results {
            html.push_str(&format!("  <h6>{}</h6>\n", escape_html(&result.layer_title)));

            for (index, feature) in result.features.iter().enumerate() {
                html.push_str(&format!(
                    "  <div class=\"feature\"><strong>Feature {}:</strong>\n",
                    index + 1
                ));
                html.push_str("    <table>\n");
                for (key, value) in feature.attributes() {
                    html.push_str(&format!(
                        "      <tr><td>{}</td><td class=\"value\">{}</td></tr>\n",
                        escape_html(key),
                        escape_html(&value)
                    ));
                }
                html.push_str("    </table>\n  </div>\n");
            }
        }

        html.push_str("</div>");
        html
    }

    /// Format as plain text
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return NO_FEATURES_MESSAGE.to_string();
        }

        let mut text = String::new();

        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                text.push_str("\n---\n");
            }
            text.push_str(&format!("Layer: {}\n", result.layer_title));
            for (index, feature) in result.features.iter().enumerate() {
                text.push_str(&format!("Feature {}:\n", index + 1));
                for (key, value) in feature.attributes() {
                    text.push_str(&format!("  {}: {}\n", key, value));
                }
            }
        }

        text
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert pixel coordinates to geographic coordinates
///
/// # Arguments
/// - `i`: Pixel column (0-based from left)
/// - `j`: Pixel row (0-based from top)
/// - `width`: Map width in pixels
/// - `height`: Map height in pixels
/// - `bbox`: Bounding box [min_lon, min_lat, max_lon, max_lat]
///
/// # Returns
/// (longitude, latitude)
pub fn pixel_to_geographic(i: u32, j: u32, width: u32, height: u32, bbox: [f64; 4]) -> (f64, f64) {
    let [min_lon, min_lat, max_lon, max_lat] = bbox;

    // Calculate pixel center position (0.5 offset for pixel center)
    let x_ratio = (i as f64 + 0.5) / width as f64;
    let y_ratio = (j as f64 + 0.5) / height as f64;

    let lon = min_lon + x_ratio * (max_lon - min_lon);
    let lat = max_lat - y_ratio * (max_lat - min_lat); // Y is inverted (top=max, bottom=min)

    (lon, lat)
}
