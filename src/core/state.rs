use crate::core::constants::MAX_ZOOM;
use crate::core::geo::LonLat;
use serde::{Deserialize, Serialize};

/// What the map is showing: a centre, an integer zoom and the active layer
/// code (one character per layer, base layer first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    pub lon: f64,
    pub lat: f64,
    pub zoom: u8,
    #[serde(default)]
    pub layer_code: String,
}

impl MapState {
    /// Creates a state with no layer code
    pub fn new(lon: f64, lat: f64, zoom: u8) -> Self {
        Self {
            lon,
            lat,
            zoom,
            layer_code: String::new(),
        }
    }

    /// Replaces the layer code
    pub fn with_layers(mut self, layer_code: impl Into<String>) -> Self {
        self.layer_code = layer_code.into();
        self
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(self.lon, self.lat)
    }

    /// Checks coordinate ranges and that the zoom does not exceed [`MAX_ZOOM`]
    pub fn is_valid(&self) -> bool {
        self.center().is_valid() && self.zoom <= MAX_ZOOM
    }
}
