//! Prelude module for common mapstate types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapstate::prelude::*;`

pub use crate::core::{
    config::{DefaultView, HomePoint, ViewConfig},
    geo::{BoundingBox, LonLat},
    state::MapState,
    viewport::ViewportFitter,
};

pub use crate::codec::{
    decode_geo_uri, decode_location, encode_geo_uri, encode_location, QueryParams,
    ShortLinkCodec, ShortLinkTarget, StateCodec, UrlParts,
};

pub use crate::layers::{
    DecodedLayers, LayerCodeTable, LayerDescriptor, LayerDiff, LayerKind, LayerRegistry,
    LayerSync, StaticLayerRegistry,
};

pub use crate::resolver::{InitialStateResolver, ResolveRequest, ResolvedView, StateSource};
pub use crate::store::MemoryStateStore;
pub use crate::timezone::StaticTimezoneBounds;
pub use crate::traits::{LastStateStore, RendererCapability, TimezoneBoundsTable};

pub use crate::{Error as MapError, Result};

pub use fxhash::FxHashMap as HashMap;
