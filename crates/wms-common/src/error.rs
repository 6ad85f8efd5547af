//! Error types for the layer explorer.

use thiserror::Error;

/// Result type alias using ExplorerError.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Every recoverable failure the catalog and the layer session can report.
///
/// None of these are fatal; callers decide how to present them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExplorerError {
    // === Capabilities parsing ===
    #[error("Failed to parse XML response: {0}")]
    MalformedXml(String),

    #[error("No Service information found in response")]
    MissingService,

    // === Layer lookup / extent ===
    #[error("Layer information not found: {0}")]
    UnknownLayer(String),

    #[error("No bounding box information available for layer: {0}")]
    NoBoundingBox(String),

    #[error("Invalid bounding box for layer '{layer}': {message}")]
    InvalidBoundingBox { layer: String, message: String },

    #[error("No capabilities data available. Fetch layers first.")]
    NoDocument,

    // === Session ===
    #[error("Layer is already added to the map: {0}")]
    AlreadyActive(String),

    #[error("Layer is not active: {0}")]
    NotActive(String),
}

impl ExplorerError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ExplorerError::MalformedXml(_)
            | ExplorerError::MissingService
            | ExplorerError::InvalidBoundingBox { .. } => 422,

            ExplorerError::UnknownLayer(_)
            | ExplorerError::NoBoundingBox(_)
            | ExplorerError::NotActive(_)
            | ExplorerError::NoDocument => 404,

            ExplorerError::AlreadyActive(_) => 409,
        }
    }
}
