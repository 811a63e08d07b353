//! Collaborator interfaces
//!
//! The resolver and codecs never reach for globals. Anything that lives
//! outside this crate (the live map widget, the place the last location is
//! remembered, the time-zone bounds data) is handed in through one of these
//! narrow traits so each can be swapped or faked independently.

use crate::core::{geo::BoundingBox, state::MapState};

/// The slice of a live renderer this crate is allowed to use
pub trait RendererCapability {
    /// Zoom at which `bbox` fits the renderer's own viewport
    fn compute_bounds_zoom(&self, bbox: &BoundingBox) -> u8;

    /// Adds a layer by registry id
    fn add_layer(&mut self, id: &str);

    /// Removes a layer by registry id
    fn remove_layer(&mut self, id: &str);

    /// Ids of the layers currently on the map
    fn layer_ids(&self) -> Vec<String>;
}

/// Whole-snapshot persistence of the last view the user saw
pub trait LastStateStore {
    fn get(&self) -> Option<MapState>;

    fn set(&self, state: &MapState);
}

/// Country bounds keyed by IANA time-zone name
pub trait TimezoneBoundsTable {
    fn get(&self, timezone: &str) -> Option<BoundingBox>;
}
