//! The explorer's session state.
//!
//! One `LayerSession` lives for the lifetime of the application and is
//! handed to whatever translates user input into calls. It is not
//! synchronised; a multi-threaded host wraps it in a single mutex.

use wms_common::{ActiveLayer, Extent, ExplorerError, ExplorerResult, LayerInfo};
use wms_protocol::capabilities::CapabilitiesDocument;
use wms_protocol::requests::TileLayerParams;

use crate::extent::compute_extent;

/// Current server, its parsed capabilities, and the layers on the map.
#[derive(Debug, Default)]
pub struct LayerSession {
    server_url: String,
    document: Option<CapabilitiesDocument>,
    /// Insertion order is display order.
    active_layers: Vec<ActiveLayer>,
}

impl LayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Server and catalog
    // ------------------------------------------------------------------

    /// Switch to another server. Everything derived from the old one goes.
    pub fn select_server(&mut self, server_url: impl Into<String>) {
        self.server_url = server_url.into();
        self.discard();
    }

    /// Install the capabilities fetched from `server_url`.
    ///
    /// The previous document and all active layers are dropped first, so a
    /// parse failure leaves the session empty rather than stale.
    pub fn load_capabilities(
        &mut self,
        server_url: impl Into<String>,
        xml: &str,
    ) -> ExplorerResult<&CapabilitiesDocument> {
        self.select_server(server_url);
        let document = CapabilitiesDocument::parse(xml)?;
        Ok(&*self.document.insert(document))
    }

    /// Install an already parsed document for the current server.
    pub fn set_document(&mut self, document: CapabilitiesDocument) {
        self.active_layers.clear();
        self.document = Some(document);
    }

    /// Drop the document and active layers, e.g. after a failed fetch.
    pub fn discard(&mut self) {
        self.document = None;
        self.active_layers.clear();
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn document(&self) -> Option<&CapabilitiesDocument> {
        self.document.as_ref()
    }

    fn require_document(&self) -> ExplorerResult<&CapabilitiesDocument> {
        self.document.as_ref().ok_or(ExplorerError::NoDocument)
    }

    /// Extent of a layer in the current document.
    pub fn extent(&self, layer_name: &str) -> ExplorerResult<Extent> {
        compute_extent(self.require_document()?, layer_name)
    }

    /// Info panel record for a layer in the current document.
    pub fn layer_info(&self, layer_name: &str) -> ExplorerResult<LayerInfo> {
        self.require_document()?.layer_info(layer_name)
    }

    // ------------------------------------------------------------------
    // Active layers
    // ------------------------------------------------------------------

    /// Put a layer on the map, visible, after the existing ones.
    ///
    /// Activating a layer twice is an error, not a no-op, so the caller can
    /// tell the user instead of silently ignoring the click.
    pub fn activate(
        &mut self,
        layer_name: impl Into<String>,
        layer_title: impl Into<String>,
    ) -> ExplorerResult<&ActiveLayer> {
        let layer_name = layer_name.into();
        if self.is_active(&layer_name) {
            return Err(ExplorerError::AlreadyActive(layer_name));
        }

        self.active_layers
            .push(ActiveLayer::new(layer_name, layer_title));
        Ok(&self.active_layers[self.active_layers.len() - 1])
    }

    pub fn set_visibility(&mut self, layer_name: &str, visible: bool) -> ExplorerResult<()> {
        self.find_mut(layer_name)?.visible = visible;
        Ok(())
    }

    /// Flip visibility and return the new state.
    pub fn toggle_visibility(&mut self, layer_name: &str) -> ExplorerResult<bool> {
        let layer = self.find_mut(layer_name)?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Take a layer off the map. The remaining layers keep their order.
    pub fn deactivate(&mut self, layer_name: &str) -> ExplorerResult<ActiveLayer> {
        let index = self
            .active_layers
            .iter()
            .position(|layer| layer.name == layer_name)
            .ok_or_else(|| ExplorerError::NotActive(layer_name.to_string()))?;
        Ok(self.active_layers.remove(index))
    }

    pub fn is_active(&self, layer_name: &str) -> bool {
        self.active_layers.iter().any(|layer| layer.name == layer_name)
    }

    pub fn active_layers(&self) -> &[ActiveLayer] {
        &self.active_layers
    }

    /// Visible layers in display order.
    pub fn visible_layers(&self) -> impl Iterator<Item = &ActiveLayer> {
        self.active_layers.iter().filter(|layer| layer.visible)
    }

    /// Tile source parameters for an active layer.
    pub fn tile_params(&self, layer_name: &str) -> ExplorerResult<TileLayerParams> {
        if !self.is_active(layer_name) {
            return Err(ExplorerError::NotActive(layer_name.to_string()));
        }
        Ok(TileLayerParams::for_layer(layer_name))
    }

    fn find_mut(&mut self, layer_name: &str) -> ExplorerResult<&mut ActiveLayer> {
        self.active_layers
            .iter_mut()
            .find(|layer| layer.name == layer_name)
            .ok_or_else(|| ExplorerError::NotActive(layer_name.to_string()))
    }
}
