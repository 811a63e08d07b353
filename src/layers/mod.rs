//! Layer registry lookups, layer codes and active-set synchronisation.

pub mod codes;
pub mod manager;
pub mod registry;

pub use codes::{DecodedLayers, LayerCodeTable, LayerDiff};
pub use manager::LayerSync;
pub use registry::{LayerDescriptor, LayerKind, LayerRegistry, StaticLayerRegistry};
