//! Zoom-to-layer extent computation.

use wms_common::{Extent, ExplorerError, ExplorerResult};
use wms_protocol::capabilities::{select_bounding_box, CapabilitiesDocument};

/// Compute the extent to fit the view to for `layer_name`.
///
/// Returns the selected bounding box verbatim in its own CRS.
pub fn compute_extent(doc: &CapabilitiesDocument, layer_name: &str) -> ExplorerResult<Extent> {
    let descriptor = doc
        .lookup(layer_name)
        .ok_or_else(|| ExplorerError::UnknownLayer(layer_name.to_string()))?;

    let bbox = select_bounding_box(descriptor)
        .ok_or_else(|| ExplorerError::NoBoundingBox(layer_name.to_string()))?;

    let coords = bbox
        .coordinates()
        .map_err(|e| ExplorerError::InvalidBoundingBox {
            layer: layer_name.to_string(),
            message: e.to_string(),
        })?;

    Ok(Extent::new(coords, bbox.crs.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_common::{LayerBoundingBox, LayerDescriptor};

    fn doc_with(layer: LayerDescriptor) -> CapabilitiesDocument {
        CapabilitiesDocument {
            service_title: "Test".to_string(),
            service_abstract: String::new(),
            layers: vec![layer],
        }
    }

    #[test]
    fn test_extent_verbatim() {
        let doc = doc_with(
            LayerDescriptor::new("a", "A")
                .with_bounding_box(LayerBoundingBox::from_coords("CRS:84", 10.0, 20.0, 30.0, 40.0)),
        );
        let extent = compute_extent(&doc, "a").unwrap();
        assert_eq!(
            extent,
            Extent {
                min_x: 10.0,
                min_y: 20.0,
                max_x: 30.0,
                max_y: 40.0,
                crs: "CRS:84".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_layer() {
        let doc = doc_with(LayerDescriptor::new("a", "A"));
        assert_eq!(
            compute_extent(&doc, "b"),
            Err(ExplorerError::UnknownLayer("b".to_string()))
        );
    }

    #[test]
    fn test_no_bounding_box() {
        let doc = doc_with(LayerDescriptor::new("a", "A"));
        assert_eq!(
            compute_extent(&doc, "a"),
            Err(ExplorerError::NoBoundingBox("a".to_string()))
        );
    }
}
