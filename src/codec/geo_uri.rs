//! `geo:` URIs (RFC 5870) carrying a zoom: `geo:<lat>,<lon>?z=<zoom>`

use crate::codec::hash::StateCodec;
use crate::codec::query::{parse_finite, parse_zoom, QueryParams};
use crate::core::constants::DEFAULT_POINT_ZOOM;
use crate::core::geo::LonLat;
use crate::core::state::MapState;

/// Formats `state` as a geo URI, coordinates rounded as in the URL hash
pub fn encode_geo_uri(state: &MapState) -> String {
    let rounded = StateCodec::rounded(state);
    format!("geo:{},{}?z={}", rounded.lat, rounded.lon, rounded.zoom)
}

/// Parses a geo URI. An altitude and `;`-parameters (`crs`, `u`) are allowed
/// and ignored; a missing `z` means the default point zoom.
pub fn decode_geo_uri(uri: &str) -> Option<MapState> {
    let scheme = uri.get(..4)?;
    if !scheme.eq_ignore_ascii_case("geo:") {
        return None;
    }

    let rest = &uri[4..];
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let coordinates = path.split(';').next()?;

    let values = coordinates
        .split(',')
        .map(parse_finite)
        .collect::<Option<Vec<_>>>()?;
    let (lat, lon) = match values.as_slice() {
        [lat, lon] | [lat, lon, _] => (*lat, *lon),
        _ => return None,
    };

    let center = LonLat::new(lon, lat);
    if !center.is_valid() {
        return None;
    }

    let zoom = match QueryParams::parse(query).get("z") {
        Some(z) => parse_zoom(z)?,
        None => DEFAULT_POINT_ZOOM,
    };

    Some(MapState::new(lon, lat, zoom))
}
