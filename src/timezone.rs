//! Time-zone → country bounds lookup
//!
//! Used as a last resort before the hard default: a visitor whose browser
//! reports `Europe/Berlin` is shown Germany.

use crate::core::geo::BoundingBox;
use crate::prelude::HashMap;
use crate::traits::TimezoneBoundsTable;
use crate::{MapError, Result};

#[derive(Debug, Clone, Default)]
pub struct StaticTimezoneBounds {
    bounds: HashMap<String, BoundingBox>,
}

impl StaticTimezoneBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, timezone: impl Into<String>, bbox: BoundingBox) {
        self.bounds.insert(timezone.into(), bbox);
    }

    /// Loads `{"Europe/London": [minlon, minlat, maxlon, maxlat], ...}`.
    /// Entries that do not form a valid box are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, [f64; 4]> = serde_json::from_str(json)?;
        let mut table = Self::new();

        for (timezone, [min_lon, min_lat, max_lon, max_lat]) in raw {
            let bbox = BoundingBox::new(min_lon, min_lat, max_lon, max_lat)
                .validated()
                .ok_or_else(|| {
                    MapError::InvalidCoordinates(format!("bounds for time zone {}", timezone))
                })?;
            table.insert(timezone, bbox);
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

impl TimezoneBoundsTable for StaticTimezoneBounds {
    fn get(&self, timezone: &str) -> Option<BoundingBox> {
        self.bounds.get(timezone).copied()
    }
}
