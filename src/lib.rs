//! # mapstate
//!
//! Describes what a web map is looking at and moves that description in and
//! out of URLs.
//!
//! A [`MapState`] (longitude, latitude, integer zoom and an active layer code)
//! can be written as a URL hash, a compact short-link token or a geo URI, and
//! the initial state of a freshly opened map is resolved from a fixed cascade
//! of competing inputs (hash, query parameters, stored location, home point,
//! time zone, hard default).

pub mod codec;
pub mod core;
pub mod layers;
pub mod prelude;
pub mod resolver;
pub mod store;
pub mod timezone;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{HomePoint, ViewConfig},
    geo::{BoundingBox, LonLat},
    state::MapState,
    viewport::ViewportFitter,
};

pub use codec::{
    geo_uri::{decode_geo_uri, encode_geo_uri},
    hash::StateCodec,
    short_link::{ShortLinkCodec, ShortLinkTarget},
};

pub use layers::{
    codes::{DecodedLayers, LayerCodeTable, LayerDiff},
    manager::LayerSync,
    registry::{LayerDescriptor, LayerKind, LayerRegistry, StaticLayerRegistry},
};

pub use resolver::{InitialStateResolver, ResolveRequest, ResolvedView, StateSource};
pub use store::MemoryStateStore;
pub use timezone::StaticTimezoneBounds;
pub use traits::{LastStateStore, RendererCapability, TimezoneBoundsTable};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid zoom {zoom}: expected 0..={max}")]
    InvalidZoom { zoom: i64, max: u8 },

    #[error("Invalid short link token: {0}")]
    InvalidToken(String),

    #[error("Ambiguous base layer: code {code:?} names {bases:?}")]
    AmbiguousBaseLayer { code: String, bases: Vec<String> },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .try_init();
}
