//! Tests for GetCapabilities parsing and catalog lookups.

use test_utils::fixtures::capabilities;
use wms_common::{ExplorerError, LayerBoundingBox, LayerDescriptor, LayerSummary, NO_DESCRIPTION};
use wms_protocol::capabilities::{parse, select_bounding_box, CapabilitiesDocument, UNKNOWN_SERVICE};

fn names(doc: &CapabilitiesDocument) -> Vec<&str> {
    doc.layers.iter().map(|l| l.name.as_str()).collect()
}

// ============================================================================
// Service metadata
// ============================================================================

#[test]
fn test_demo_service_metadata() {
    let doc = parse(capabilities::DEMO_WMS).unwrap();
    assert_eq!(doc.service_title, "Demo WMS");
    assert_eq!(doc.service_abstract, "Demonstration weather layers");
}

#[test]
fn test_service_defaults_when_elements_missing() {
    let doc = parse(capabilities::EMPTY_SERVICE).unwrap();
    assert_eq!(doc.service_title, UNKNOWN_SERVICE);
    assert_eq!(doc.service_abstract, NO_DESCRIPTION);
    assert_eq!(doc.layer_count(), 0);
}

#[test]
fn test_empty_abstract_falls_back() {
    let doc = parse(capabilities::NESTED_GROUPS).unwrap();
    assert_eq!(doc.service_abstract, NO_DESCRIPTION);
}

// ============================================================================
// Layer extraction
// ============================================================================

#[test]
fn test_demo_layers_end_to_end() {
    let doc = parse(capabilities::DEMO_WMS).unwrap();
    assert_eq!(
        doc.layer_summaries(),
        vec![
            LayerSummary {
                name: "precip".to_string(),
                title: "Precipitation".to_string()
            },
            LayerSummary {
                name: "temp".to_string(),
                title: "Temperature".to_string()
            },
        ]
    );
}

#[test]
fn test_style_names_are_not_layer_fields() {
    let doc = parse(capabilities::DEMO_WMS).unwrap();
    let precip = doc.lookup("precip").unwrap();
    assert_eq!(precip.title, "Precipitation");
    assert_eq!(
        precip.abstract_text.as_deref(),
        Some("Accumulated precipitation (mm)")
    );
    assert!(doc.lookup("precip_default").is_none());
}

#[test]
fn test_nested_layers_in_document_order() {
    let doc = parse(capabilities::NESTED_GROUPS).unwrap();
    assert_eq!(
        names(&doc),
        vec![
            "admin:states",
            "admin:districts",
            "hydro:rivers",
            "admin:villages"
        ]
    );
}

#[test]
fn test_layer_missing_title_is_skipped() {
    // "hydro" has a Name but its only Title belongs to the nested layer
    let doc = parse(capabilities::NESTED_GROUPS).unwrap();
    assert!(doc.lookup("hydro").is_none());
    assert_eq!(doc.lookup("hydro:rivers").unwrap().title, "Rivers");
}

#[test]
fn test_root_layer_with_service_title_is_excluded() {
    let doc = parse(capabilities::DEMO_WMS).unwrap();
    assert!(doc.lookup("demo").is_none());
    assert!(doc.layers.iter().all(|l| l.title != doc.service_title));
}

#[test]
fn test_namespaced_document() {
    let doc = parse(capabilities::NAMESPACED).unwrap();
    assert_eq!(doc.service_title, "Prefixed & Escaped");
    assert_eq!(doc.service_abstract, "Layers <served> raw");
    let layer = doc.lookup("landuse").unwrap();
    assert_eq!(layer.title, "Land Use & Cover");
    assert_eq!(layer.bounding_boxes.len(), 1);
}

#[test]
fn test_wms_111_srs_attribute() {
    let doc = parse(capabilities::WMS_111).unwrap();
    let roads = doc.lookup("roads").unwrap();
    // LatLonBoundingBox is not a BoundingBox
    assert_eq!(roads.bounding_boxes.len(), 1);
    assert_eq!(roads.bounding_boxes[0].crs, "EPSG:4326");
}

#[test]
fn test_lowercase_crs_attribute() {
    let doc = parse(capabilities::NESTED_GROUPS).unwrap();
    let states = doc.lookup("admin:states").unwrap();
    assert_eq!(states.bounding_boxes[0].crs, "CRS:84");
    assert_eq!(states.bounding_boxes[0].maxy.as_deref(), Some("35.5"));
}

#[test]
fn test_bounding_boxes_keep_raw_text() {
    let doc = parse(capabilities::BROKEN_BOXES).unwrap();
    let partial = doc.lookup("partial").unwrap();
    assert_eq!(partial.bounding_boxes[0].maxy, None);
    let garbage = doc.lookup("garbage").unwrap();
    assert_eq!(garbage.bounding_boxes[0].minx.as_deref(), Some("west"));
}

#[test]
fn test_duplicate_names_lookup_first() {
    let doc = parse(capabilities::DUPLICATE_NAMES).unwrap();
    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.lookup("ndvi").unwrap().title, "NDVI (first)");
}

#[test]
fn test_search_matches_title_and_name() {
    let doc = parse(capabilities::NESTED_GROUPS).unwrap();
    let hits: Vec<&str> = doc.search("ADMIN").iter().map(|l| l.name.as_str()).collect();
    assert_eq!(hits, vec!["admin:states", "admin:districts", "admin:villages"]);
    assert_eq!(doc.search("river").len(), 1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_service() {
    assert_eq!(
        parse(capabilities::NO_SERVICE),
        Err(ExplorerError::MissingService)
    );
}

#[test]
fn test_malformed_xml() {
    assert!(matches!(
        parse(capabilities::MALFORMED),
        Err(ExplorerError::MalformedXml(_))
    ));
}

#[test]
fn test_html_error_page_is_malformed() {
    assert!(matches!(
        parse(capabilities::HTML_ERROR_PAGE),
        Err(ExplorerError::MalformedXml(_))
    ));
}

#[test]
fn test_trailing_content_is_malformed() {
    let xml = format!("{}<extra/>", capabilities::EMPTY_SERVICE);
    assert!(matches!(parse(&xml), Err(ExplorerError::MalformedXml(_))));
}

#[test]
fn test_layer_info_for_unknown_layer() {
    let doc = parse(capabilities::DEMO_WMS).unwrap();
    assert_eq!(
        doc.layer_info("nope"),
        Err(ExplorerError::UnknownLayer("nope".to_string()))
    );
}

// ============================================================================
// Bounding box selection
// ============================================================================

#[test]
fn test_select_crs84_regardless_of_position() {
    let descriptor = LayerDescriptor::new("a", "A")
        .with_bounding_box(LayerBoundingBox::from_coords("EPSG:3857", 0.0, 0.0, 1.0, 1.0))
        .with_bounding_box(LayerBoundingBox::from_coords("EPSG:4326", 0.0, 0.0, 2.0, 2.0))
        .with_bounding_box(LayerBoundingBox::from_coords("CRS:84", 0.0, 0.0, 3.0, 3.0));
    assert_eq!(select_bounding_box(&descriptor).unwrap().crs, "CRS:84");
}

#[test]
fn test_select_first_without_crs84() {
    let descriptor = LayerDescriptor::new("a", "A")
        .with_bounding_box(LayerBoundingBox::from_coords("EPSG:3857", 0.0, 0.0, 1.0, 1.0))
        .with_bounding_box(LayerBoundingBox::from_coords("EPSG:4326", 0.0, 0.0, 2.0, 2.0));
    assert_eq!(select_bounding_box(&descriptor).unwrap().crs, "EPSG:3857");
}

#[test]
fn test_select_none_without_boxes() {
    let descriptor = LayerDescriptor::new("a", "A");
    assert!(select_bounding_box(&descriptor).is_none());
}

#[test]
fn test_layer_info_without_box() {
    let doc = parse(capabilities::BROKEN_BOXES).unwrap();
    let info = doc.layer_info("nobox").unwrap();
    assert_eq!(info.bbox_summary, "No bounding box");
    let info = doc.layer_info("partial").unwrap();
    assert_eq!(info.bbox_summary, "CRS:84: 0, 0, 10, ?");
}
