//! Core constants derived from slippy-map conventions and the permalink formats.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest integer zoom a view state may carry.
pub const MAX_ZOOM: u8 = 20;

/// Added to the zoom before dividing by three to size a short-link token.
pub const SHORT_LINK_ZOOM_OFFSET: i64 = 8;

/// Zoom used for `mlon`/`mlat` and `lon`/`lat` query parameters without `zoom`.
pub const DEFAULT_POINT_ZOOM: u8 = 12;

/// Zoom used when centring on the configured home point.
pub const HOME_ZOOM: u8 = 15;

/// Fallback view when nothing else is known.
pub const DEFAULT_LON: f64 = 0.0;
pub const DEFAULT_LAT: f64 = 30.0;
pub const DEFAULT_ZOOM: u8 = 3;

/// Viewport assumed when fitting bounds before a renderer exists.
pub const DEFAULT_VIEWPORT_SIZE: (u32, u32) = (1024, 768);

/// Smallest axis fraction the analytic fitter divides by.
pub const FIT_EPSILON: f64 = 1e-9;
