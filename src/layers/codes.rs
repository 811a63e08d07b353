//! Layer codes
//!
//! Each registered layer has a one-character code, and the active layer set
//! travels in URLs as the concatenation of those codes with the base layer
//! first. Unknown characters are skipped so that links minted by a newer
//! deployment still open on an older one.

use crate::layers::registry::LayerRegistry;
use crate::{MapError, Result};

/// Layer ids named by a layer code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLayers {
    pub base_id: String,
    pub overlay_ids: Vec<String>,
}

impl DecodedLayers {
    /// All ids, base first
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.base_id.as_str()).chain(self.overlay_ids.iter().map(String::as_str))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids().any(|candidate| candidate == id)
    }
}

/// What has to change to move from one active set to another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerDiff {
    pub remove: Vec<String>,
    pub add: Vec<String>,
    /// Set only when the base layer differs from the current one
    pub base_changed: Option<String>,
}

impl LayerDiff {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }
}

/// Converts between active layer sets and layer codes
pub struct LayerCodeTable<'a, R: LayerRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: LayerRegistry + ?Sized> LayerCodeTable<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a R {
        self.registry
    }

    /// Concatenates the codes of the active layers: the base layer first,
    /// then overlays in registration order. Ids the registry does not know
    /// are left out. Only one base is written: if several are active, the
    /// first in registration order wins, so the code always decodes.
    pub fn encode<S: AsRef<str>>(&self, active_ids: &[S]) -> String {
        let is_active = |id: &str| active_ids.iter().any(|active| active.as_ref() == id);

        let (bases, overlays): (Vec<_>, Vec<_>) = self
            .registry
            .descriptors()
            .iter()
            .filter(|layer| is_active(layer.id.as_str()))
            .partition(|layer| layer.is_base());

        if bases.len() > 1 {
            log::warn!("{} base layers active, encoding only {}", bases.len(), bases[0].id);
        }

        bases
            .into_iter()
            .take(1)
            .chain(overlays)
            .map(|layer| layer.code)
            .collect()
    }

    /// Resolves a code to layer ids.
    ///
    /// Fails with [`MapError::AmbiguousBaseLayer`] when the code names two
    /// different base layers; falls back to the registry's default base when
    /// it names none.
    pub fn decode(&self, code: &str) -> Result<DecodedLayers> {
        let mut bases: Vec<String> = Vec::new();
        let mut overlay_ids: Vec<String> = Vec::new();

        for ch in code.chars() {
            let Some(layer) = self.registry.by_code(ch) else {
                log::debug!("ignoring unknown layer code {:?}", ch);
                continue;
            };

            let target = if layer.is_base() {
                &mut bases
            } else {
                &mut overlay_ids
            };
            if !target.contains(&layer.id) {
                target.push(layer.id.clone());
            }
        }

        if bases.len() > 1 {
            return Err(MapError::AmbiguousBaseLayer {
                code: code.to_string(),
                bases,
            });
        }

        let base_id = bases
            .pop()
            .unwrap_or_else(|| self.registry.default_base_id().to_string());

        Ok(DecodedLayers {
            base_id,
            overlay_ids,
        })
    }

    /// Set difference between the current active ids and a decoded code.
    /// Layers present on both sides are left alone so they keep their state.
    pub fn apply<S: AsRef<str>>(&self, current_ids: &[S], decoded: &DecodedLayers) -> LayerDiff {
        let remove = current_ids
            .iter()
            .map(|id| id.as_ref())
            .filter(|id| !decoded.contains(id))
            .map(str::to_string)
            .collect();

        let add = decoded
            .ids()
            .filter(|id| !current_ids.iter().any(|current| current.as_ref() == *id))
            .map(str::to_string)
            .collect();

        let current_base = current_ids.iter().map(|id| id.as_ref()).find(|id| {
            self.registry
                .by_id(id)
                .map(|layer| layer.is_base())
                .unwrap_or(false)
        });

        let base_changed = if current_base == Some(decoded.base_id.as_str()) {
            None
        } else {
            Some(decoded.base_id.clone())
        };

        LayerDiff {
            remove,
            add,
            base_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::registry::StaticLayerRegistry;

    fn registry() -> StaticLayerRegistry {
        StaticLayerRegistry::openstreetmap()
    }

    #[test]
    fn test_encode_orders_base_first() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);

        assert_eq!(table.encode(&["gps", "notes", "cyclemap"]), "CNG");
        assert_eq!(table.encode(&["mapnik"]), "M");
        assert_eq!(table.encode(&["unknown", "data"]), "D");
        assert_eq!(table.encode::<&str>(&[]), "");
    }

    #[test]
    fn test_encode_writes_a_single_base() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);

        let code = table.encode(&["cyclemap", "notes", "mapnik"]);
        assert_eq!(code, "MN");

        let decoded = table.decode(&code).unwrap();
        assert_eq!(decoded.base_id, "mapnik");
        assert_eq!(decoded.overlay_ids, vec!["notes".to_string()]);
    }

    #[test]
    fn test_decode() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);

        let decoded = table.decode("TN").unwrap();
        assert_eq!(decoded.base_id, "transportmap");
        assert_eq!(decoded.overlay_ids, vec!["notes".to_string()]);
        assert_eq!(decoded.ids().collect::<Vec<_>>(), vec!["transportmap", "notes"]);
    }

    #[test]
    fn test_decode_skips_unknown_and_defaults_base() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);

        let decoded = table.decode("?D!").unwrap();
        assert_eq!(decoded.base_id, "mapnik");
        assert_eq!(decoded.overlay_ids, vec!["data".to_string()]);

        assert_eq!(table.decode("").unwrap().base_id, "mapnik");
    }

    #[test]
    fn test_decode_rejects_two_bases() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);

        match table.decode("MCN") {
            Err(MapError::AmbiguousBaseLayer { bases, .. }) => {
                assert_eq!(bases, vec!["mapnik".to_string(), "cyclemap".to_string()]);
            }
            other => panic!("expected ambiguous base layer, got {:?}", other),
        }

        // the same base twice is not ambiguous
        assert_eq!(table.decode("MM").unwrap().base_id, "mapnik");
    }

    #[test]
    fn test_apply_is_a_set_difference() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);
        let decoded = table.decode("CG").unwrap();

        let diff = table.apply(&["mapnik", "gps", "notes"], &decoded);
        assert_eq!(diff.remove, vec!["mapnik".to_string(), "notes".to_string()]);
        assert_eq!(diff.add, vec!["cyclemap".to_string()]);
        assert_eq!(diff.base_changed.as_deref(), Some("cyclemap"));
    }

    #[test]
    fn test_apply_without_base_change() {
        let registry = registry();
        let table = LayerCodeTable::new(&registry);
        let decoded = table.decode("MD").unwrap();

        let diff = table.apply(&["mapnik"], &decoded);
        assert!(diff.remove.is_empty());
        assert_eq!(diff.add, vec!["data".to_string()]);
        assert!(diff.base_changed.is_none());

        let diff = table.apply(&["mapnik", "data"], &decoded);
        assert!(diff.is_empty());
    }
}
