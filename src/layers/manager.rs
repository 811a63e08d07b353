use crate::layers::codes::{LayerCodeTable, LayerDiff};
use crate::layers::registry::LayerRegistry;
use crate::traits::RendererCapability;
use crate::Result;

type BaseLayerListener = Box<dyn FnMut(&str)>;

/// Keeps a renderer's active layers in step with incoming layer codes
pub struct LayerSync {
    /// Active layer ids in the order they were added
    active: Vec<String>,
    listeners: Vec<BaseLayerListener>,
}

impl LayerSync {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Starts from whatever the renderer is already showing
    pub fn from_renderer(renderer: &dyn RendererCapability) -> Self {
        Self {
            active: renderer.layer_ids(),
            listeners: Vec::new(),
        }
    }

    /// Registers a callback fired with the new base layer id whenever an
    /// update changes the base layer
    pub fn on_base_layer_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn active_ids(&self) -> &[String] {
        &self.active
    }

    /// The layer code for the current active set
    pub fn layer_code<R: LayerRegistry + ?Sized>(&self, table: &LayerCodeTable<'_, R>) -> String {
        table.encode(&self.active)
    }

    /// Applies `code` to the renderer, touching only the layers that differ.
    ///
    /// An ambiguous code is logged and returned as an error; the active set
    /// and the renderer are left as they were.
    pub fn update_from_code<R: LayerRegistry + ?Sized>(
        &mut self,
        code: &str,
        table: &LayerCodeTable<'_, R>,
        renderer: &mut dyn RendererCapability,
    ) -> Result<LayerDiff> {
        let decoded = table.decode(code).map_err(|e| {
            log::warn!("keeping current layers: {}", e);
            e
        })?;

        let diff = table.apply(&self.active, &decoded);

        for id in &diff.remove {
            renderer.remove_layer(id);
            self.active.retain(|active| active != id);
        }

        for id in &diff.add {
            renderer.add_layer(id);
            self.active.push(id.clone());
        }

        if let Some(base_id) = &diff.base_changed {
            log::debug!("base layer changed to {}", base_id);
            for listener in &mut self.listeners {
                listener(base_id);
            }
        }

        Ok(diff)
    }

    /// Gets the number of active layers
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Checks if no layer is active
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for LayerSync {
    fn default() -> Self {
        Self::new()
    }
}
