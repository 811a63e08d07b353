//! Short link tokens
//!
//! Longitude and latitude are quantised to 32 bits each and bit-interleaved
//! (x bit first) into a 64-bit Morton key, so tokens that share a prefix are
//! close together on the map. The key is written six bits per character from
//! the most significant end and cut off once the requested zoom's resolution
//! is reached: `ceil((zoom + 8) / 3)` characters. `(zoom + 8) % 3` trailing
//! `-` characters record the remainder so the zoom comes back exactly.

use crate::codec::hash::StateCodec;
use crate::codec::query::QueryParams;
use crate::core::constants::{MAX_ZOOM, SHORT_LINK_ZOOM_OFFSET};
use crate::core::state::MapState;
use crate::{MapError, Result};
use once_cell::sync::Lazy;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_~";

/// Marks the zoom remainder at the end of a token
const ZOOM_PAD: char = '-';

/// A 64-bit key holds at most ten whole six-bit characters
const MAX_TOKEN_CHARS: usize = 10;

const SCALE: f64 = 4_294_967_296.0; // 2^32

static DECODE_TABLE: Lazy<[Option<u8>; 128]> = Lazy::new(|| {
    let mut table = [None; 128];
    for (index, &symbol) in ALPHABET.iter().enumerate() {
        table[symbol as usize] = Some(index as u8);
    }
    // legacy links used '@' where '~' is now written
    table[b'@' as usize] = table[b'~' as usize];
    table
});

/// Compact reversible encoding of a location and zoom
pub struct ShortLinkCodec;

impl ShortLinkCodec {
    pub fn encode(lon: f64, lat: f64, zoom: u8) -> Result<String> {
        if zoom > MAX_ZOOM {
            return Err(MapError::InvalidZoom {
                zoom: zoom as i64,
                max: MAX_ZOOM,
            });
        }

        let x = ((lon + 180.0).rem_euclid(360.0) * SCALE / 360.0) as u32;
        let y = ((lat + 90.0) * SCALE / 180.0) as u32;
        let key = interleave(x, y);

        let total = zoom as i64 + SHORT_LINK_ZOOM_OFFSET;
        let chars = ((total + 2) / 3) as usize;
        let pad = (total % 3) as usize;

        let mut token = String::with_capacity(chars + pad);
        for i in 0..chars {
            let digit = (key >> (58 - 6 * i)) & 0x3F;
            token.push(ALPHABET[digit as usize] as char);
        }
        token.extend(std::iter::repeat(ZOOM_PAD).take(pad));

        Ok(token)
    }

    pub fn encode_state(state: &MapState) -> Result<String> {
        Self::encode(state.lon, state.lat, state.zoom)
    }

    /// Recovers the location (to the token's resolution) and exact zoom.
    /// The returned state carries no layer code.
    pub fn decode(token: &str) -> Result<MapState> {
        let invalid = || MapError::InvalidToken(token.to_string());

        let mut x: u32 = 0;
        let mut y: u32 = 0;
        let mut chars = 0usize;
        let mut pad = 0usize;

        for ch in token.chars() {
            if ch == ZOOM_PAD {
                pad += 1;
                continue;
            }
            if pad > 0 || chars == MAX_TOKEN_CHARS {
                return Err(invalid());
            }

            let mut group = lookup(ch).ok_or_else(invalid)?;
            for _ in 0..3 {
                x = (x << 1) | ((group >> 5) & 1) as u32;
                y = (y << 1) | ((group >> 4) & 1) as u32;
                group <<= 2;
            }
            chars += 1;
        }

        if chars == 0 || pad > 2 {
            return Err(invalid());
        }

        let bits = 3 * chars as u32;
        x <<= 32 - bits;
        y <<= 32 - bits;

        let zoom = bits as i64 - SHORT_LINK_ZOOM_OFFSET - ((3 - pad as i64) % 3);
        if !(0..=MAX_ZOOM as i64).contains(&zoom) {
            return Err(invalid());
        }

        let lon = x as f64 * 360.0 / SCALE - 180.0;
        let lat = y as f64 * 180.0 / SCALE - 90.0;

        Ok(MapState::new(lon, lat, zoom as u8))
    }

    /// `/go/<token>[?layers=<code>][&m]`
    pub fn path(state: &MapState, marker: bool) -> Result<String> {
        let mut path = format!("/go/{}", Self::encode_state(state)?);
        let mut separator = '?';

        if !state.layer_code.is_empty() {
            path.push(separator);
            path.push_str("layers=");
            path.push_str(&state.layer_code);
            separator = '&';
        }

        if marker {
            path.push(separator);
            path.push('m');
        }

        Ok(path)
    }
}

/// What a `/go/...` short link points at
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLinkTarget {
    pub state: MapState,
    /// Whether a marker should be dropped at the location
    pub marker: bool,
}

impl ShortLinkTarget {
    /// Parses a short-link path or full URL. Anything that is not a valid
    /// `/go/<token>` link yields `None`.
    pub fn parse(url: &str) -> Option<Self> {
        let (_, rest) = url.split_once("/go/")?;
        let rest = rest.split('#').next().unwrap_or_default();
        let (token, query) = rest.split_once('?').unwrap_or((rest, ""));
        let params = QueryParams::parse(query);

        let state = ShortLinkCodec::decode(token)
            .ok()?
            .with_layers(params.get("layers").unwrap_or_default());

        Some(Self {
            state,
            marker: params.contains("m"),
        })
    }

    /// The full map URL path this link expands to: the marker (if any) as
    /// `mlat`/`mlon` parameters followed by the hash
    pub fn expand(&self) -> String {
        let hash = StateCodec::encode_hash(&self.state);
        if self.marker {
            let rounded = StateCodec::rounded(&self.state);
            format!("/?mlat={}&mlon={}{}", rounded.lat, rounded.lon, hash)
        } else {
            format!("/{}", hash)
        }
    }
}

fn lookup(ch: char) -> Option<u8> {
    let index = ch as usize;
    if index < 128 {
        DECODE_TABLE[index]
    } else {
        None
    }
}

/// Interleaves two 32-bit values, most significant bits first, `x` taking the
/// higher bit of each pair
fn interleave(x: u32, y: u32) -> u64 {
    (0..32).rev().fold(0u64, |key, i| {
        (key << 2) | ((((x >> i) & 1) as u64) << 1) | ((y >> i) & 1) as u64
    })
}
