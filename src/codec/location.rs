//! Stored location string: `lon|lat|zoom|layers`, the form a web front end
//! keeps in its location cookie.

use crate::codec::query::{parse_finite, parse_zoom};
use crate::core::state::MapState;

pub fn encode_location(state: &MapState) -> String {
    format!(
        "{}|{}|{}|{}",
        state.lon, state.lat, state.zoom, state.layer_code
    )
}

/// Parses a stored location. The layer field may be missing.
pub fn decode_location(text: &str) -> Option<MapState> {
    let mut fields = text.trim().split('|');
    let lon = parse_finite(fields.next()?)?;
    let lat = parse_finite(fields.next()?)?;
    let zoom = parse_zoom(fields.next()?)?;
    let layer_code = fields.next().unwrap_or_default();

    if fields.next().is_some() {
        return None;
    }

    let state = MapState::new(lon, lat, zoom).with_layers(layer_code);
    state.is_valid().then_some(state)
}
