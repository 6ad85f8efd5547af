//! Common types shared across the WMS layer explorer crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod layer;

pub use bbox::{BboxParseError, BoundingBox, Extent, LayerBoundingBox};
pub use crs::{is_crs84, CrsCode, CRS84};
pub use error::{ExplorerError, ExplorerResult};
pub use layer::{ActiveLayer, LayerDescriptor, LayerInfo, LayerSummary, NO_DESCRIPTION};
