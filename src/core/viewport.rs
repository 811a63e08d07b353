use crate::core::constants::{DEFAULT_VIEWPORT_SIZE, FIT_EPSILON, MAX_ZOOM, TILE_SIZE};
use crate::core::geo::{BoundingBox, LonLat};
use crate::core::state::MapState;
use crate::traits::RendererCapability;
use std::f64::consts::PI;

/// Picks the zoom at which a bounding box fills a viewport
///
/// With a live renderer the question is delegated to it, since it knows its
/// real size and projection. Without one (the map has not mounted yet) the
/// zoom is estimated from the viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFitter {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// The maximum zoom level ever returned
    pub max_zoom: u8,
}

impl ViewportFitter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom.min(MAX_ZOOM);
        self
    }

    /// Zoom that fits `bbox`, asking `renderer` when one is available
    pub fn fit_zoom(&self, bbox: &BoundingBox, renderer: Option<&dyn RendererCapability>) -> u8 {
        match renderer {
            Some(renderer) => renderer.compute_bounds_zoom(bbox).min(self.max_zoom),
            None => self.analytic_zoom(bbox),
        }
    }

    /// Estimates the fitting zoom from a sine-of-latitude Mercator
    /// approximation, taking the tighter of the two axes
    pub fn analytic_zoom(&self, bbox: &BoundingBox) -> u8 {
        let lat_fraction = (mercator_y(bbox.max_lat) - mercator_y(bbox.min_lat)) / PI;
        let lon_fraction = bbox.lon_span() / 360.0;

        let lat_zoom = self.axis_zoom(self.height, lat_fraction);
        let lon_zoom = self.axis_zoom(self.width, lon_fraction);

        lat_zoom.min(lon_zoom)
    }

    /// Centre and zoom for `bbox`
    pub fn fit(&self, bbox: &BoundingBox, renderer: Option<&dyn RendererCapability>) -> (LonLat, u8) {
        (bbox.center(), self.fit_zoom(bbox, renderer))
    }

    /// A state showing `bbox` with the given layer code
    pub fn fit_state(
        &self,
        bbox: &BoundingBox,
        renderer: Option<&dyn RendererCapability>,
        layer_code: &str,
    ) -> MapState {
        let (center, zoom) = self.fit(bbox, renderer);
        MapState::new(center.lon, center.lat, zoom).with_layers(layer_code)
    }

    fn axis_zoom(&self, viewport_px: u32, fraction: f64) -> u8 {
        let fraction = fraction.max(FIT_EPSILON);
        let zoom = (viewport_px as f64 / TILE_SIZE as f64 / fraction).log2().floor();

        if zoom.is_nan() || zoom <= 0.0 {
            0
        } else {
            zoom.min(self.max_zoom as f64) as u8
        }
    }
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_SIZE.0, DEFAULT_VIEWPORT_SIZE.1)
    }
}

fn mercator_y(lat: f64) -> f64 {
    lat.to_radians().sin()
}
