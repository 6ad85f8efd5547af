//! WMS GetCapabilities catalog.
//!
//! Parses a capabilities document into the list of named layers it
//! advertises and answers name-keyed lookups against it. Works on WMS 1.3.0
//! and 1.1.1 responses, with or without namespace prefixes.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use wms_common::{
    ExplorerError, ExplorerResult, LayerBoundingBox, LayerDescriptor, LayerInfo, LayerSummary,
    NO_DESCRIPTION,
};

/// Service title used when the document has none.
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

/// A parsed capabilities document.
///
/// Immutable once built. A new fetch replaces the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilitiesDocument {
    pub service_title: String,
    pub service_abstract: String,
    /// Named layers in document order, excluding the root layer.
    pub layers: Vec<LayerDescriptor>,
}

impl CapabilitiesDocument {
    /// Parse a GetCapabilities XML response.
    pub fn parse(xml: &str) -> ExplorerResult<Self> {
        parse(xml)
    }

    /// Find a layer by exact name. First occurrence wins.
    pub fn lookup(&self, layer_name: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|layer| layer.name == layer_name)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Ordered name/title pairs for table display.
    pub fn layer_summaries(&self) -> Vec<LayerSummary> {
        self.layers.iter().map(LayerDescriptor::summary).collect()
    }

    /// Layers whose title or name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&LayerDescriptor> {
        let needle = query.to_lowercase();
        self.layers
            .iter()
            .filter(|layer| {
                layer.title.to_lowercase().contains(&needle)
                    || layer.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Title, abstract and bounding box summary for a layer.
    pub fn layer_info(&self, layer_name: &str) -> ExplorerResult<LayerInfo> {
        self.lookup(layer_name)
            .map(layer_info)
            .ok_or_else(|| ExplorerError::UnknownLayer(layer_name.to_string()))
    }
}

/// Pick the bounding box used to zoom to a layer.
///
/// The `CRS:84` box wins wherever it appears, otherwise the first box in
/// document order.
pub fn select_bounding_box(descriptor: &LayerDescriptor) -> Option<&LayerBoundingBox> {
    descriptor
        .bounding_boxes
        .iter()
        .find(|bbox| bbox.is_crs84())
        .or_else(|| descriptor.bounding_boxes.first())
}

/// Build the info panel record for a layer.
pub fn layer_info(descriptor: &LayerDescriptor) -> LayerInfo {
    let abstract_text = descriptor
        .abstract_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_DESCRIPTION)
        .to_string();

    let bbox_summary = match select_bounding_box(descriptor) {
        Some(bbox) => {
            let crs = if bbox.crs.is_empty() {
                "unknown CRS"
            } else {
                bbox.crs.as_str()
            };
            let coord = |value: &Option<String>| value.clone().unwrap_or_else(|| "?".to_string());
            format!(
                "{}: {}, {}, {}, {}",
                crs,
                coord(&bbox.minx),
                coord(&bbox.miny),
                coord(&bbox.maxx),
                coord(&bbox.maxy)
            )
        }
        None => "No bounding box".to_string(),
    };

    LayerInfo {
        title: descriptor.title.clone(),
        abstract_text,
        bbox_summary,
    }
}

/// Parse a GetCapabilities XML response into a [`CapabilitiesDocument`].
///
/// Fails with `MalformedXml` on any syntax error and with `MissingService`
/// when there is no `Service` element. A document without named layers is
/// not an error.
pub fn parse(xml: &str) -> ExplorerResult<CapabilitiesDocument> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut parser = CapabilitiesParser::default();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            ExplorerError::MalformedXml(format!(
                "XML parsing error at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => parser.start(&e, false)?,
            Event::Empty(e) => parser.start(&e, true)?,
            Event::End(_) => parser.end()?,
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_error)?;
                parser.text(&text)?;
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                parser.text(&String::from_utf8_lossy(&raw))?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

fn xml_error(err: quick_xml::Error) -> ExplorerError {
    ExplorerError::MalformedXml(err.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ServiceTitle,
    ServiceAbstract,
    LayerName,
    LayerTitle,
    LayerAbstract,
}

/// Text being collected for a field, closed when the element at `depth` ends.
#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Default, PartialEq, Eq)]
enum ServiceState {
    #[default]
    NotSeen,
    Open {
        depth: usize,
    },
    Done,
}

#[derive(Debug, Default)]
struct LayerBuilder {
    depth: usize,
    slot: usize,
    name: Option<String>,
    title: Option<String>,
    abstract_text: Option<String>,
    bounding_boxes: Vec<LayerBoundingBox>,
}

impl LayerBuilder {
    fn build(self) -> Option<LayerDescriptor> {
        Some(LayerDescriptor {
            name: self.name?,
            title: self.title?,
            abstract_text: self.abstract_text,
            bounding_boxes: self.bounding_boxes,
        })
    }
}

#[derive(Debug, Default)]
struct CapabilitiesParser {
    /// Local names of the currently open elements.
    path: Vec<Vec<u8>>,
    seen_root: bool,
    root_closed: bool,
    service: ServiceState,
    service_title: Option<String>,
    service_abstract: Option<String>,
    open_layers: Vec<LayerBuilder>,
    /// One slot per `Layer` start tag so nested layers keep document order.
    slots: Vec<Option<LayerDescriptor>>,
    capture: Option<Capture>,
}

impl CapabilitiesParser {
    fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> ExplorerResult<()> {
        if self.root_closed {
            return Err(ExplorerError::MalformedXml(
                "content after the root element".to_string(),
            ));
        }
        self.seen_root = true;

        let local = e.local_name();
        let name = local.as_ref();
        let parent_is_layer = self.parent_is(b"Layer");
        let parent_is_service = self.parent_is(b"Service")
            && self.service == ServiceState::Open {
                depth: self.path.len(),
            };

        self.path.push(name.to_vec());
        let depth = self.path.len();

        match name {
            b"Service" if self.service == ServiceState::NotSeen => {
                self.service = ServiceState::Open { depth };
            }
            b"Layer" => {
                self.slots.push(None);
                self.open_layers.push(LayerBuilder {
                    depth,
                    slot: self.slots.len() - 1,
                    ..Default::default()
                });
            }
            b"Title" if parent_is_service => self.begin_capture(Field::ServiceTitle, depth),
            b"Abstract" if parent_is_service => self.begin_capture(Field::ServiceAbstract, depth),
            b"Name" if parent_is_layer => self.begin_capture(Field::LayerName, depth),
            b"Title" if parent_is_layer => self.begin_capture(Field::LayerTitle, depth),
            b"Abstract" if parent_is_layer => self.begin_capture(Field::LayerAbstract, depth),
            b"BoundingBox" if parent_is_layer => {
                let bbox = read_bounding_box(e)?;
                if let Some(layer) = self.open_layers.last_mut() {
                    layer.bounding_boxes.push(bbox);
                }
            }
            _ => {}
        }

        if empty {
            self.end()?;
        }
        Ok(())
    }

    fn end(&mut self) -> ExplorerResult<()> {
        let depth = self.path.len();
        if depth == 0 {
            return Err(ExplorerError::MalformedXml(
                "closing tag without a matching start tag".to_string(),
            ));
        }

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.commit(capture.field, capture.text);
            }
        }

        if self.open_layers.last().is_some_and(|l| l.depth == depth) {
            if let Some(layer) = self.open_layers.pop() {
                let slot = layer.slot;
                self.slots[slot] = layer.build();
            }
        }

        if self.service == (ServiceState::Open { depth }) {
            self.service = ServiceState::Done;
        }

        self.path.pop();
        if self.path.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> ExplorerResult<()> {
        if self.path.is_empty() {
            return Err(ExplorerError::MalformedXml(
                "text outside of the root element".to_string(),
            ));
        }
        if let Some(capture) = self.capture.as_mut() {
            capture.text.push_str(text);
        }
        Ok(())
    }

    fn finish(self) -> ExplorerResult<CapabilitiesDocument> {
        if !self.seen_root {
            return Err(ExplorerError::MalformedXml(
                "document has no root element".to_string(),
            ));
        }
        if let Some(open) = self.path.last() {
            return Err(ExplorerError::MalformedXml(format!(
                "unexpected end of document inside <{}>",
                String::from_utf8_lossy(open)
            )));
        }
        if self.service == ServiceState::NotSeen {
            return Err(ExplorerError::MissingService);
        }

        let service_title = non_empty_or(self.service_title, UNKNOWN_SERVICE);
        let service_abstract = non_empty_or(self.service_abstract, NO_DESCRIPTION);

        let layers = self
            .slots
            .into_iter()
            .flatten()
            .filter(|layer| layer.title != service_title)
            .collect();

        Ok(CapabilitiesDocument {
            service_title,
            service_abstract,
            layers,
        })
    }

    fn parent_is(&self, name: &[u8]) -> bool {
        self.path.last().is_some_and(|p| p.as_slice() == name)
    }

    fn begin_capture(&mut self, field: Field, depth: usize) {
        if self.capture.is_none() && !self.has_field(field) {
            self.capture = Some(Capture {
                field,
                depth,
                text: String::new(),
            });
        }
    }

    fn has_field(&self, field: Field) -> bool {
        match field {
            Field::ServiceTitle => self.service_title.is_some(),
            Field::ServiceAbstract => self.service_abstract.is_some(),
            Field::LayerName => self.open_layers.last().is_some_and(|l| l.name.is_some()),
            Field::LayerTitle => self.open_layers.last().is_some_and(|l| l.title.is_some()),
            Field::LayerAbstract => self
                .open_layers
                .last()
                .is_some_and(|l| l.abstract_text.is_some()),
        }
    }

    fn commit(&mut self, field: Field, text: String) {
        match field {
            Field::ServiceTitle => self.service_title = Some(text),
            Field::ServiceAbstract => self.service_abstract = Some(text),
            Field::LayerName | Field::LayerTitle | Field::LayerAbstract => {
                let Some(layer) = self.open_layers.last_mut() else {
                    return;
                };
                let slot = match field {
                    Field::LayerName => &mut layer.name,
                    Field::LayerTitle => &mut layer.title,
                    _ => &mut layer.abstract_text,
                };
                *slot = Some(text);
            }
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read the CRS and corner attributes of a `<BoundingBox>` element.
///
/// The CRS attribute name is matched case-insensitively (`CRS`, `crs`) and
/// WMS 1.1.1 `SRS` is used when no CRS attribute is present.
fn read_bounding_box(e: &BytesStart<'_>) -> ExplorerResult<LayerBoundingBox> {
    let mut bbox = LayerBoundingBox::default();
    let mut crs = None;
    let mut srs = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|err| ExplorerError::MalformedXml(err.to_string()))?;
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        let key = attr.key.local_name();

        match key.as_ref() {
            k if k.eq_ignore_ascii_case(b"crs") => {
                crs.get_or_insert(value);
            }
            k if k.eq_ignore_ascii_case(b"srs") => {
                srs.get_or_insert(value);
            }
            b"minx" => bbox.minx = Some(value),
            b"miny" => bbox.miny = Some(value),
            b"maxx" => bbox.maxx = Some(value),
            b"maxy" => bbox.maxy = Some(value),
            _ => {}
        }
    }

    bbox.crs = crs.or(srs).map(|c| c.trim().to_string()).unwrap_or_default();
    Ok(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0">
  <Service>
    <Name>WMS</Name>
    <Title>Demo WMS</Title>
  </Service>
  <Capability>
    <Layer>
      <Title>Demo WMS</Title>
      <Layer queryable="1">
        <Name>precip</Name>
        <Title>Precipitation</Title>
        <BoundingBox CRS="EPSG:4326" minx="-90" miny="-180" maxx="90" maxy="180"/>
        <BoundingBox CRS="CRS:84" minx="-180" miny="-90" maxx="180" maxy="90"/>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

    #[test]
    fn test_parse_minimal() {
        let doc = parse(MINIMAL).unwrap();
        assert_eq!(doc.service_title, "Demo WMS");
        assert_eq!(doc.service_abstract, NO_DESCRIPTION);
        assert_eq!(doc.layer_count(), 1);
        assert_eq!(doc.layers[0].bounding_boxes.len(), 2);
    }

    #[test]
    fn test_select_prefers_crs84() {
        let doc = parse(MINIMAL).unwrap();
        let bbox = select_bounding_box(&doc.layers[0]).unwrap();
        assert_eq!(bbox.crs, "CRS:84");
        assert_eq!(bbox.minx.as_deref(), Some("-180"));
    }

    #[test]
    fn test_service_name_is_not_a_layer_name() {
        // <Service><Name> must not leak into any layer
        let doc = parse(MINIMAL).unwrap();
        assert!(doc.lookup("WMS").is_none());
    }

    #[test]
    fn test_unclosed_document_is_malformed() {
        let err = parse("<WMS_Capabilities><Service>").unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedXml(_)));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        assert!(matches!(parse(""), Err(ExplorerError::MalformedXml(_))));
    }

    #[test]
    fn test_layer_info_summary() {
        let doc = parse(MINIMAL).unwrap();
        let info = doc.layer_info("precip").unwrap();
        assert_eq!(info.title, "Precipitation");
        assert_eq!(info.abstract_text, NO_DESCRIPTION);
        assert_eq!(info.bbox_summary, "CRS:84: -180, -90, 180, 90");
    }
}
