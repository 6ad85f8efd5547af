//! Layer definitions for capabilities catalogs and map sessions.

use serde::{Deserialize, Serialize};

use crate::LayerBoundingBox;

/// Fallback text shown when a layer or service carries no abstract.
pub const NO_DESCRIPTION: &str = "No description available";

/// A named layer advertised by a WMS capabilities document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// Layer name (used in GetMap requests and as lookup key)
    pub name: String,

    /// Human-readable title, not necessarily unique
    pub title: String,

    /// Optional description/abstract
    pub abstract_text: Option<String>,

    /// Bounding boxes in document order
    pub bounding_boxes: Vec<LayerBoundingBox>,
}

impl LayerDescriptor {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            abstract_text: None,
            bounding_boxes: Vec::new(),
        }
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    pub fn with_bounding_box(mut self, bbox: LayerBoundingBox) -> Self {
        self.bounding_boxes.push(bbox);
        self
    }

    /// Name/title pair for table display.
    pub fn summary(&self) -> LayerSummary {
        LayerSummary {
            name: self.name.clone(),
            title: self.title.clone(),
        }
    }
}

/// One row of the layer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub name: String,
    pub title: String,
}

/// Details for a layer info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub bbox_summary: String,
}

/// A layer the user has added to the map.
///
/// The map keeps its own rendering object keyed by `name`; this record is
/// the source of truth for order and visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveLayer {
    pub name: String,
    pub title: String,
    pub visible: bool,
}

impl ActiveLayer {
    /// Newly activated layers start out visible.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_layer_starts_visible() {
        let layer = ActiveLayer::new("precip", "Precipitation");
        assert!(layer.visible);
        assert_eq!(layer.name, "precip");
    }

    #[test]
    fn test_layer_info_serializes_abstract_key() {
        let info = LayerInfo {
            title: "Temperature".to_string(),
            abstract_text: NO_DESCRIPTION.to_string(),
            bbox_summary: "No bounding box".to_string(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["abstract"], NO_DESCRIPTION);
    }
}
