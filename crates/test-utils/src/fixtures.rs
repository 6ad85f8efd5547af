//! Common test fixtures for layer explorer tests.
//!
//! Capabilities documents modelled on what real WMS servers (GeoServer,
//! MapServer) return, trimmed to the elements the explorer reads.

/// GetCapabilities documents.
pub mod capabilities {
    /// "Demo WMS" with a named root layer and two data layers.
    ///
    /// `precip` has an EPSG:4326 box followed by a CRS:84 box, `temp` only an
    /// EPSG:3857 box. Both carry a `<Style>` whose `Name`/`Title` must not be
    /// picked up as layer fields.
    pub const DEMO_WMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms" xmlns:xlink="http://www.w3.org/1999/xlink">
  <Service>
    <Name>WMS</Name>
    <Title>Demo WMS</Title>
    <Abstract>Demonstration weather layers</Abstract>
  </Service>
  <Capability>
    <Request>
      <GetCapabilities>
        <Format>text/xml</Format>
      </GetCapabilities>
    </Request>
    <Layer>
      <Name>demo</Name>
      <Title>Demo WMS</Title>
      <CRS>EPSG:4326</CRS>
      <CRS>CRS:84</CRS>
      <Layer queryable="1">
        <Name>precip</Name>
        <Title>Precipitation</Title>
        <Abstract>Accumulated precipitation (mm)</Abstract>
        <BoundingBox CRS="EPSG:4326" minx="20" miny="10" maxx="40" maxy="30"/>
        <BoundingBox CRS="CRS:84" minx="10" miny="20" maxx="30" maxy="40"/>
        <Style>
          <Name>precip_default</Name>
          <Title>Default precipitation style</Title>
        </Style>
      </Layer>
      <Layer queryable="1">
        <Name>temp</Name>
        <Title>Temperature</Title>
        <BoundingBox CRS="EPSG:3857" minx="-1113194.9" miny="0" maxx="1113194.9" maxy="2273030.9"/>
        <Style>
          <Name>temp_default</Name>
          <Title>Default temperature style</Title>
        </Style>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

    /// GeoServer style nesting: unnamed root and group layers, a group with
    /// only a `Name`, and a leaf without a `Title`.
    pub const NESTED_GROUPS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0">
  <Service>
    <Title>GeoServer Web Map Service</Title>
    <Abstract></Abstract>
  </Service>
  <Capability>
    <Layer>
      <Title>GeoServer Web Map Service</Title>
      <Layer>
        <Title>Boundaries</Title>
        <Layer>
          <Name>admin:states</Name>
          <Title>States</Title>
          <BoundingBox crs="CRS:84" minx="68.1" miny="6.5" maxx="97.4" maxy="35.5"/>
        </Layer>
        <Layer>
          <Name>admin:districts</Name>
          <Title>Districts</Title>
        </Layer>
      </Layer>
      <Layer>
        <Name>hydro</Name>
        <Layer>
          <Name>hydro:rivers</Name>
          <Title>Rivers</Title>
        </Layer>
      </Layer>
      <Layer>
        <Name>admin:villages</Name>
        <Title>Villages</Title>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

    /// Every element carries a `wms:` namespace prefix.
    pub const NAMESPACED: &str = r#"<?xml version="1.0"?>
<wms:WMS_Capabilities xmlns:wms="http://www.opengis.net/wms" version="1.3.0">
  <wms:Service>
    <wms:Title>Prefixed &amp; Escaped</wms:Title>
    <wms:Abstract><![CDATA[Layers <served> raw]]></wms:Abstract>
  </wms:Service>
  <wms:Capability>
    <wms:Layer>
      <wms:Name>landuse</wms:Name>
      <wms:Title>Land Use &amp; Cover</wms:Title>
      <wms:BoundingBox CRS="CRS:84" minx="-10" miny="-5" maxx="10" maxy="5"/>
    </wms:Layer>
  </wms:Capability>
</wms:WMS_Capabilities>"#;

    /// WMS 1.1.1 response using `SRS` instead of `CRS`.
    pub const WMS_111: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMT_MS_Capabilities version="1.1.1">
  <Service>
    <Name>OGC:WMS</Name>
    <Title>Legacy Server</Title>
  </Service>
  <Capability>
    <Layer>
      <Title>Legacy Server</Title>
      <Layer>
        <Name>roads</Name>
        <Title>Roads</Title>
        <LatLonBoundingBox minx="-180" miny="-90" maxx="180" maxy="90"/>
        <BoundingBox SRS="EPSG:4326" minx="-180" miny="-90" maxx="180" maxy="90"/>
      </Layer>
    </Layer>
  </Capability>
</WMT_MS_Capabilities>"#;

    /// Layers with missing and broken bounding boxes.
    pub const BROKEN_BOXES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0">
  <Service>
    <Title>Broken Boxes</Title>
  </Service>
  <Capability>
    <Layer>
      <Name>nobox</Name>
      <Title>No Box</Title>
    </Layer>
    <Layer>
      <Name>partial</Name>
      <Title>Partial Box</Title>
      <BoundingBox CRS="CRS:84" minx="0" miny="0" maxx="10"/>
    </Layer>
    <Layer>
      <Name>garbage</Name>
      <Title>Garbage Box</Title>
      <BoundingBox CRS="EPSG:4326" minx="west" miny="0" maxx="10" maxy="10"/>
    </Layer>
    <Layer>
      <Name>inverted</Name>
      <Title>Inverted Box</Title>
      <BoundingBox CRS="CRS:84" minx="30" miny="40" maxx="10" maxy="20"/>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

    /// The same layer name advertised twice with different titles.
    pub const DUPLICATE_NAMES: &str = r#"<WMS_Capabilities version="1.3.0">
  <Service><Title>Dupes</Title></Service>
  <Capability>
    <Layer>
      <Name>ndvi</Name>
      <Title>NDVI (first)</Title>
    </Layer>
    <Layer>
      <Name>ndvi</Name>
      <Title>NDVI (second)</Title>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

    /// Well-formed, but no `Service` element (an exception report).
    pub const NO_SERVICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ServiceExceptionReport version="1.3.0">
  <ServiceException code="InvalidParameterValue">Unknown request</ServiceException>
</ServiceExceptionReport>"#;

    /// Service without Title/Abstract and without any layers.
    pub const EMPTY_SERVICE: &str = r#"<WMS_Capabilities version="1.3.0">
  <Service/>
  <Capability/>
</WMS_Capabilities>"#;

    /// Mismatched closing tag.
    pub const MALFORMED: &str = r#"<WMS_Capabilities version="1.3.0">
  <Service><Title>Broken</Service></Title>
</WMS_Capabilities>"#;

    /// An HTML error page served instead of XML.
    pub const HTML_ERROR_PAGE: &str = "<html><body><h1>502 Bad Gateway</h1><br></body></html>";
}

/// GetFeatureInfo responses.
pub mod feature_info {
    /// Two features with a few properties each.
    pub const DISTRICTS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "districts.1", "geometry": null,
     "properties": {"name": "Krishna", "state": "Andhra Pradesh"}},
    {"type": "Feature", "id": "districts.2", "geometry": null,
     "properties": {"name": "Guntur", "state": "Andhra Pradesh"}}
  ],
  "totalFeatures": 2,
  "numberReturned": 2
}"#;

    /// Nothing at the location.
    pub const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;
}
