//! Layer session for the WMS layer explorer.
//!
//! Tracks the layers a user has put on the map, their order and visibility,
//! and answers extent queries against the current capabilities document.

pub mod extent;
pub mod session;

pub use extent::compute_extent;
pub use session::LayerSession;
