//! URL hash form of a view: `#map=<zoom>/<lat>/<lon>[&layers=<code>]`

use crate::codec::query::{parse_finite, parse_zoom, QueryParams};
use crate::core::geo::LonLat;
use crate::core::state::MapState;

/// Human-readable URL hash encoding
pub struct StateCodec;

impl StateCodec {
    /// Decimal places kept for coordinates at `zoom`: enough that rounding
    /// moves the point by less than one pixel of a 256px-tile map.
    pub fn zoom_precision(zoom: u8) -> usize {
        let pixels = 2_f64.powi(8 + zoom as i32);
        (pixels / 180.0).log10().ceil().max(0.0) as usize
    }

    /// Rounds a coordinate to the precision used at `zoom`
    pub fn round_coordinate(value: f64, zoom: u8) -> f64 {
        let factor = 10_f64.powi(Self::zoom_precision(zoom) as i32);
        // adding zero folds -0.0 into 0.0
        (value * factor).round() / factor + 0.0
    }

    /// `state` with its coordinates rounded the way the hash writes them
    pub fn rounded(state: &MapState) -> MapState {
        MapState {
            lon: Self::round_coordinate(state.lon, state.zoom),
            lat: Self::round_coordinate(state.lat, state.zoom),
            zoom: state.zoom,
            layer_code: state.layer_code.clone(),
        }
    }

    pub fn encode_hash(state: &MapState) -> String {
        let rounded = Self::rounded(state);
        let mut hash = format!("#map={}/{}/{}", rounded.zoom, rounded.lat, rounded.lon);

        if !state.layer_code.is_empty() {
            hash.push_str("&layers=");
            hash.push_str(&state.layer_code);
        }

        hash
    }

    /// Parses a hash (anything from `#` on; text before it and anything from
    /// a second `#` on is ignored).
    /// Returns `None` for every malformed or out-of-range input.
    pub fn decode_hash(hash: &str) -> Option<MapState> {
        let (_, fragment) = hash.split_once('#')?;
        let fragment = fragment.split('#').next().unwrap_or_default();
        let params = QueryParams::parse(fragment);

        let mut parts = params.get("map")?.split('/');
        let (zoom, lat, lon) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(zoom), Some(lat), Some(lon), None) => (zoom, lat, lon),
            _ => return None,
        };

        let zoom = parse_zoom(zoom)?;
        let center = LonLat::new(parse_finite(lon)?, parse_finite(lat)?);
        if !center.is_valid() {
            return None;
        }

        let layer_code = params.get("layers").unwrap_or_default();

        Some(MapState::new(center.lon, center.lat, zoom).with_layers(layer_code))
    }
}
