//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::crs::is_crs84;

/// A geographic or projected bounding box.
///
/// For geographic CRS (CRS:84, EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857, etc.), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A `<BoundingBox>` element as advertised by a capabilities document.
///
/// Coordinates stay as the raw attribute text. Servers publish all sorts of
/// garbage here, so turning them into numbers is deferred to
/// [`LayerBoundingBox::coordinates`] where the failure can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerBoundingBox {
    /// CRS identifier (`CRS`/`crs`, or `SRS` for WMS 1.1.1). Empty when absent.
    pub crs: String,
    pub minx: Option<String>,
    pub miny: Option<String>,
    pub maxx: Option<String>,
    pub maxy: Option<String>,
}

impl LayerBoundingBox {
    /// Build a box from numeric corners, mostly useful in tests.
    pub fn from_coords(crs: impl Into<String>, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            crs: crs.into(),
            minx: Some(min_x.to_string()),
            miny: Some(min_y.to_string()),
            maxx: Some(max_x.to_string()),
            maxy: Some(max_y.to_string()),
        }
    }

    /// Whether this box is the WMS-mandated geographic `CRS:84` box.
    pub fn is_crs84(&self) -> bool {
        is_crs84(&self.crs)
    }

    /// Parse the four corner attributes.
    ///
    /// Ordering (`min <= max`) is not checked.
    pub fn coordinates(&self) -> Result<BoundingBox, BboxParseError> {
        Ok(BoundingBox {
            min_x: parse_coord("minx", self.minx.as_deref())?,
            min_y: parse_coord("miny", self.miny.as_deref())?,
            max_x: parse_coord("maxx", self.maxx.as_deref())?,
            max_y: parse_coord("maxy", self.maxy.as_deref())?,
        })
    }
}

fn parse_coord(attr: &'static str, raw: Option<&str>) -> Result<f64, BboxParseError> {
    let raw = raw.ok_or(BboxParseError::MissingAttribute(attr))?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| BboxParseError::InvalidNumber {
            attr,
            value: raw.to_string(),
        })?;

    // "NaN" and "inf" parse fine as f64 but are never a usable corner
    if !value.is_finite() {
        return Err(BboxParseError::InvalidNumber {
            attr,
            value: raw.to_string(),
        });
    }

    Ok(value)
}

/// A CRS-tagged rectangle in the coordinate system of the source document.
///
/// Reprojection into a display CRS is the renderer's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub crs: String,
}

impl Extent {
    pub fn new(bbox: BoundingBox, crs: impl Into<String>) -> Self {
        Self {
            min_x: bbox.min_x,
            min_y: bbox.min_y,
            max_x: bbox.max_x,
            max_y: bbox.max_y,
            crs: crs.into(),
        }
    }

    /// The rectangle without its CRS tag.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BboxParseError {
    #[error("missing '{0}' attribute")]
    MissingAttribute(&'static str),

    #[error("invalid number in '{attr}': {value:?}")]
    InvalidNumber { attr: &'static str, value: String },
}
