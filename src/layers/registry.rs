use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Base,
    Overlay,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Base => write!(f, "base"),
            LayerKind::Overlay => write!(f, "overlay"),
        }
    }
}

/// A layer as known to the registry: stable id, one-character URL code and kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: String,
    pub code: char,
    pub kind: LayerKind,
}

impl LayerDescriptor {
    pub fn base(id: impl Into<String>, code: char) -> Self {
        Self {
            id: id.into(),
            code,
            kind: LayerKind::Base,
        }
    }

    pub fn overlay(id: impl Into<String>, code: char) -> Self {
        Self {
            id: id.into(),
            code,
            kind: LayerKind::Overlay,
        }
    }

    pub fn is_base(&self) -> bool {
        self.kind == LayerKind::Base
    }
}

/// Read-only view of the available layers
///
/// `descriptors` lists layers in registration order; the lookups are derived
/// from it unless an implementation has a faster index.
pub trait LayerRegistry {
    fn descriptors(&self) -> &[LayerDescriptor];

    /// Id of the base layer used when a code names none
    fn default_base_id(&self) -> &str;

    fn by_id(&self, id: &str) -> Option<&LayerDescriptor> {
        self.descriptors().iter().find(|layer| layer.id == id)
    }

    fn by_code(&self, code: char) -> Option<&LayerDescriptor> {
        self.descriptors().iter().find(|layer| layer.code == code)
    }
}

/// Registry backed by a fixed list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticLayerRegistry {
    layers: Vec<LayerDescriptor>,
    default_base: String,
}

impl StaticLayerRegistry {
    /// Builds a registry whose default base layer is the first base layer in
    /// `layers`, or the first layer of any kind if there is none.
    pub fn new(layers: Vec<LayerDescriptor>) -> Self {
        let default_base = layers
            .iter()
            .find(|layer| layer.is_base())
            .or_else(|| layers.first())
            .map(|layer| layer.id.clone())
            .unwrap_or_default();

        Self {
            layers,
            default_base,
        }
    }

    pub fn with_default_base(mut self, id: impl Into<String>) -> Self {
        self.default_base = id.into();
        self
    }

    /// The layer set of the public OpenStreetMap site
    pub fn openstreetmap() -> Self {
        Self::new(vec![
            LayerDescriptor::base("mapnik", 'M'),
            LayerDescriptor::base("cyclosm", 'Y'),
            LayerDescriptor::base("cyclemap", 'C'),
            LayerDescriptor::base("transportmap", 'T'),
            LayerDescriptor::base("tracestracktopo", 'P'),
            LayerDescriptor::base("hot", 'H'),
            LayerDescriptor::overlay("notes", 'N'),
            LayerDescriptor::overlay("data", 'D'),
            LayerDescriptor::overlay("gps", 'G'),
        ])
    }
}

impl LayerRegistry for StaticLayerRegistry {
    fn descriptors(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    fn default_base_id(&self) -> &str {
        &self.default_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let registry = StaticLayerRegistry::openstreetmap();

        assert_eq!(registry.default_base_id(), "mapnik");
        assert_eq!(registry.by_code('C').map(|l| l.id.as_str()), Some("cyclemap"));
        assert_eq!(registry.by_id("gps").map(|l| l.code), Some('G'));
        assert!(registry.by_code('Z').is_none());
        assert!(!registry.by_id("notes").unwrap().is_base());
    }

    #[test]
    fn test_default_base_fallbacks() {
        let registry = StaticLayerRegistry::new(vec![
            LayerDescriptor::overlay("data", 'D'),
            LayerDescriptor::base("standard", 'S'),
        ]);
        assert_eq!(registry.default_base_id(), "standard");

        let registry = registry.with_default_base("other");
        assert_eq!(registry.default_base_id(), "other");

        assert_eq!(StaticLayerRegistry::new(Vec::new()).default_base_id(), "");
    }

    #[test]
    fn test_layer_kind_display() {
        assert_eq!(LayerKind::Base.to_string(), "base");
        assert_eq!(LayerKind::Overlay.to_string(), "overlay");
    }
}
