use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate as longitude then latitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Creates a new LonLat coordinate
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lon(lon: f64) -> f64 {
        let wrapped = lon % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }
}

impl Default for LonLat {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<geo_types::Coord<f64>> for LonLat {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl From<LonLat> for geo_types::Coord<f64> {
    fn from(point: LonLat) -> Self {
        geo_types::coord! { x: point.lon, y: point.lat }
    }
}

/// A longitude/latitude box. `max_lon < min_lon` means the box crosses the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Parses `minlon,minlat,maxlon,maxlat`, returning `None` unless there are
    /// exactly four numbers forming a valid box.
    pub fn parse(text: &str) -> Option<Self> {
        let values = text
            .split(',')
            .map(|part| part.trim().parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()?;

        match values.as_slice() {
            [min_lon, min_lat, max_lon, max_lat] => {
                Self::new(*min_lon, *min_lat, *max_lon, *max_lat).validated()
            }
            _ => None,
        }
    }

    /// Returns the box if every edge is finite and in range and the latitude
    /// span is not inverted.
    pub fn validated(self) -> Option<Self> {
        let corners_ok = LonLat::new(self.min_lon, self.min_lat).is_valid()
            && LonLat::new(self.max_lon, self.max_lat).is_valid();

        if corners_ok && self.min_lat <= self.max_lat {
            Some(self)
        } else {
            None
        }
    }

    /// Checks whether the box crosses the antimeridian
    pub fn wraps_antimeridian(&self) -> bool {
        self.max_lon < self.min_lon
    }

    /// Longitude span in degrees, corrected for antimeridian crossing
    pub fn lon_span(&self) -> f64 {
        let raw = self.max_lon - self.min_lon;
        if raw < 0.0 {
            raw + 360.0
        } else {
            raw
        }
    }

    /// Latitude span in degrees
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Arithmetic midpoint on each axis. A wrapping box is averaged in
    /// unwrapped longitude and folded back into [-180, 180].
    pub fn center(&self) -> LonLat {
        let lon = self.min_lon + self.lon_span() / 2.0;
        LonLat::new(LonLat::wrap_lon(lon), (self.min_lat + self.max_lat) / 2.0)
    }

    /// Converts to a `geo_types::Rect`. Boxes crossing the antimeridian have no
    /// rectangle equivalent.
    pub fn to_rect(&self) -> Option<geo_types::Rect<f64>> {
        if self.wraps_antimeridian() {
            return None;
        }

        Some(geo_types::Rect::new(
            geo_types::coord! { x: self.min_lon, y: self.min_lat },
            geo_types::coord! { x: self.max_lon, y: self.max_lat },
        ))
    }
}

impl From<geo_types::Rect<f64>> for BoundingBox {
    fn from(rect: geo_types::Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self::new(min.x, min.y, max.x, max.y)
    }
}
