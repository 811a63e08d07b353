//! Configuration for initial view resolution
//!
//! Everything the resolver needs to know about its surroundings that is not
//! read from the URL: the viewport it fits bounds into, the zoom ceiling, the
//! user's home point and the zooms used for point-style inputs.

use crate::core::constants::{
    DEFAULT_LAT, DEFAULT_LON, DEFAULT_POINT_ZOOM, DEFAULT_VIEWPORT_SIZE, DEFAULT_ZOOM, HOME_ZOOM,
    MAX_ZOOM,
};
use crate::core::geo::LonLat;
use crate::core::state::MapState;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// A user's configured home location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomePoint {
    pub lon: f64,
    pub lat: f64,
}

impl HomePoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_valid(&self) -> bool {
        LonLat::new(self.lon, self.lat).is_valid()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Viewport width in pixels used by the analytic fitter
    pub viewport_width: u32,
    /// Viewport height in pixels used by the analytic fitter
    pub viewport_height: u32,
    pub max_zoom: u8,
    pub home: Option<HomePoint>,
    pub home_zoom: u8,
    /// Zoom for marker and point parameters that omit `zoom`
    pub point_zoom: u8,
    pub default_view: DefaultView,
}

impl ViewConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    ///
    /// Zooms are clamped to `max_zoom`, itself capped at [`MAX_ZOOM`]. A
    /// default view centred outside the valid range is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: ViewConfig = serde_json::from_str(json)?;
        config.max_zoom = config.max_zoom.min(MAX_ZOOM);
        config.home_zoom = config.home_zoom.min(config.max_zoom);
        config.point_zoom = config.point_zoom.min(config.max_zoom);
        config.default_view.zoom = config.default_view.zoom.min(config.max_zoom);

        let center = LonLat::new(config.default_view.lon, config.default_view.lat);
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "default view centre {}, {}",
                center.lon, center.lat
            )));
        }

        Ok(config)
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_home(mut self, home: HomePoint) -> Self {
        self.home = Some(home);
        self
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_SIZE.0,
            viewport_height: DEFAULT_VIEWPORT_SIZE.1,
            max_zoom: MAX_ZOOM,
            home: None,
            home_zoom: HOME_ZOOM,
            point_zoom: DEFAULT_POINT_ZOOM,
            default_view: DefaultView::default(),
        }
    }
}

/// The view used when no input yields a state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultView {
    pub lon: f64,
    pub lat: f64,
    pub zoom: u8,
}

impl DefaultView {
    pub fn to_state(self) -> MapState {
        MapState::new(self.lon, self.lat, self.zoom)
    }
}

impl Default for DefaultView {
    fn default() -> Self {
        Self {
            lon: DEFAULT_LON,
            lat: DEFAULT_LAT,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert_eq!(config.viewport_size(), (1024, 768));
        assert_eq!(config.max_zoom, MAX_ZOOM);
        assert_eq!(config.home_zoom, 15);
        assert_eq!(config.point_zoom, 12);
        assert!(config.home.is_none());
        assert_eq!(config.default_view.to_state(), MapState::new(0.0, 30.0, 3));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = ViewConfig::from_json(
            r#"{"viewport_width": 800, "home": {"lon": 13.4, "lat": 52.5}, "max_zoom": 40}"#,
        )
        .unwrap();

        assert_eq!(config.viewport_size(), (800, 768));
        assert_eq!(config.home, Some(HomePoint::new(13.4, 52.5)));
        assert_eq!(config.max_zoom, MAX_ZOOM);
    }

    #[test]
    fn test_config_zooms_clamped_to_max_zoom() {
        let config = ViewConfig::from_json(
            r#"{"max_zoom": 18, "point_zoom": 30, "home_zoom": 19, "default_view": {"lon": 0, "lat": 30, "zoom": 25}}"#,
        )
        .unwrap();

        assert_eq!(config.max_zoom, 18);
        assert_eq!(config.point_zoom, 18);
        assert_eq!(config.home_zoom, 18);
        assert_eq!(config.default_view.zoom, 18);
        assert!(config.default_view.to_state().is_valid());
    }

    #[test]
    fn test_config_rejects_out_of_range_default_view() {
        let result =
            ViewConfig::from_json(r#"{"default_view": {"lon": 200, "lat": 30, "zoom": 3}}"#);
        assert!(matches!(result, Err(MapError::InvalidCoordinates(_))));

        let result =
            ViewConfig::from_json(r#"{"default_view": {"lon": 0, "lat": -91, "zoom": 3}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(ViewConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_builders() {
        let config = ViewConfig::default()
            .with_viewport(640, 480)
            .with_home(HomePoint::new(1.0, 2.0));
        assert_eq!(config.viewport_size(), (640, 480));
        assert!(config.home.unwrap().is_valid());
    }
}
