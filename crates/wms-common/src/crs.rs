//! Coordinate Reference System identifiers.
//!
//! The explorer never transforms coordinates, it only needs to recognise a
//! handful of identifiers when choosing between advertised bounding boxes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The WMS 1.3.0 geographic CRS (WGS84 with lon/lat axis order).
pub const CRS84: &str = "CRS:84";

/// Exact match against `CRS:84`, the identifier every WMS 1.3.0 layer must
/// advertise a box for.
pub fn is_crs84(crs: &str) -> bool {
    crs == CRS84
}

/// Well-known CRS codes seen in capabilities documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 lon/lat (`CRS:84`)
    Crs84,
    /// WGS84 Geographic (lat/lon in degrees)
    Epsg4326,
    /// Web Mercator (meters)
    Epsg3857,
}

impl CrsCode {
    /// Parse a CRS string from a capabilities document or WMS request.
    ///
    /// Accepts formats like:
    /// - "CRS:84"
    /// - "EPSG:4326" / "epsg:4326"
    /// - "EPSG:3857" / "EPSG:900913"
    pub fn from_wms_string(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "CRS:84" => Ok(CrsCode::Crs84),
            "EPSG:4326" => Ok(CrsCode::Epsg4326),
            "EPSG:3857" | "EPSG:900913" => Ok(CrsCode::Epsg3857),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }

    /// Check if this is a geographic (degree based) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Crs84 | CrsCode::Epsg4326)
    }

    /// Unit label for coordinates in this CRS.
    pub fn units(&self) -> &'static str {
        if self.is_geographic() {
            "degrees"
        } else {
            "meters"
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CrsCode::Crs84 => CRS84,
            CrsCode::Epsg4326 => "EPSG:4326",
            CrsCode::Epsg3857 => "EPSG:3857",
        };
        write!(f, "{}", code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}
