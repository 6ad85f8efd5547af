//! Shared test utilities for the layer explorer workspace.
//!
//! Provides sample GetCapabilities documents and GetFeatureInfo responses.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::fixtures::capabilities;
//! ```

pub mod fixtures;

pub use fixtures::*;
