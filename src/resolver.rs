//! Initial view resolution
//!
//! A freshly opened map can be told where to look by many competing inputs.
//! They are tried in a fixed order and the first one that validates wins:
//!
//! 1. the URL hash (including its layer code)
//! 2. a `bbox=minlon,minlat,maxlon,maxlat` parameter
//! 3. separate `minlon`, `minlat`, `maxlon`, `maxlat` parameters
//! 4. a marker given by `mlon`, `mlat` and optional `zoom`
//! 5. a point given by `lon`, `lat` and optional `zoom`
//! 6. the last stored state
//! 7. the configured home point
//! 8. the bounds registered for the visitor's time zone
//! 9. the configured default view
//!
//! Tiers 2 to 5 keep the layer code of the stored state, if there is one.
//! Nothing here fails: a tier that does not validate just hands over to the
//! next one.

use crate::codec::hash::StateCodec;
use crate::codec::query::{parse_zoom, QueryParams, UrlParts};
use crate::core::config::{DefaultView, ViewConfig};
use crate::core::constants::MAX_ZOOM;
use crate::core::geo::{BoundingBox, LonLat};
use crate::core::state::MapState;
use crate::core::viewport::ViewportFitter;
use crate::traits::{LastStateStore, RendererCapability, TimezoneBoundsTable};
use serde::Serialize;

/// The external inputs read for one resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveRequest {
    /// URL fragment including `#`
    pub hash: Option<String>,
    pub query: QueryParams,
    /// IANA time-zone name reported by the visitor's locale
    pub timezone: Option<String>,
}

impl ResolveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the query and fragment of a full or relative URL
    pub fn from_url(url: &str) -> Self {
        let parts = UrlParts::parse(url);
        Self {
            query: parts.query_params(),
            hash: parts.fragment,
            timezone: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = QueryParams::parse(query);
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

/// Which input produced the initial view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateSource {
    Hash,
    BboxParam,
    EdgeParams,
    Marker,
    Point,
    Stored,
    Home,
    Timezone,
    Default,
}

/// The resolved initial view and how it was reached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedView {
    pub state: MapState,
    pub source: StateSource,
    /// Bounds that were fitted, for bbox and time-zone sources
    pub bounds: Option<BoundingBox>,
    /// Marker position requested by `mlon`/`mlat`
    pub marker: Option<LonLat>,
}

impl ResolvedView {
    fn new(state: MapState, source: StateSource) -> Self {
        Self {
            state,
            source,
            bounds: None,
            marker: None,
        }
    }

    fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Resolves the initial [`MapState`] from a [`ResolveRequest`]
pub struct InitialStateResolver<'a> {
    config: ViewConfig,
    store: Option<&'a dyn LastStateStore>,
    timezones: Option<&'a dyn TimezoneBoundsTable>,
    renderer: Option<&'a dyn RendererCapability>,
}

impl<'a> InitialStateResolver<'a> {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            store: None,
            timezones: None,
            renderer: None,
        }
    }

    pub fn with_store(mut self, store: &'a dyn LastStateStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_timezones(mut self, timezones: &'a dyn TimezoneBoundsTable) -> Self {
        self.timezones = Some(timezones);
        self
    }

    /// Fit bounds through a mounted renderer instead of the analytic estimate
    pub fn with_renderer(mut self, renderer: &'a dyn RendererCapability) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn resolve(&self, request: &ResolveRequest) -> MapState {
        self.resolve_view(request).state
    }

    pub fn resolve_view(&self, request: &ResolveRequest) -> ResolvedView {
        if let Some(view) = self.from_hash(request) {
            log::debug!("initial view from hash: {:?}", view.state);
            return view;
        }

        let stored = self.store.and_then(|store| store.get());
        let inherited = stored
            .as_ref()
            .map(|state| state.layer_code.clone())
            .unwrap_or_default();
        let query = &request.query;

        let view = self
            .from_bbox_param(query, &inherited)
            .or_else(|| self.from_edge_params(query, &inherited))
            .or_else(|| self.from_marker(query, &inherited))
            .or_else(|| self.from_point(query, &inherited))
            .or_else(|| self.from_stored(stored))
            .or_else(|| self.from_home())
            .or_else(|| self.from_timezone(request))
            .unwrap_or_else(|| ResolvedView::new(self.default_state(), StateSource::Default));

        log::debug!("initial view from {:?}: {:?}", view.source, view.state);
        view
    }

    /// Persists `state` as the last known view, if a store is attached
    pub fn remember(&self, state: &MapState) {
        if let Some(store) = self.store {
            store.set(state);
        }
    }

    /// `max_zoom` as configured, never above [`MAX_ZOOM`]
    fn max_zoom(&self) -> u8 {
        self.config.max_zoom.min(MAX_ZOOM)
    }

    fn fitter(&self) -> ViewportFitter {
        let (width, height) = self.config.viewport_size();
        ViewportFitter::new(width, height).with_max_zoom(self.max_zoom())
    }

    fn fit(&self, bbox: BoundingBox, layer_code: &str, source: StateSource) -> ResolvedView {
        let state = self.fitter().fit_state(&bbox, self.renderer, layer_code);
        ResolvedView::new(state, source).with_bounds(bbox)
    }

    fn from_hash(&self, request: &ResolveRequest) -> Option<ResolvedView> {
        let hash = request.hash.as_deref()?;
        let state = StateCodec::decode_hash(hash);
        if state.is_none() {
            log::debug!("ignoring unusable hash {:?}", hash);
        }

        state.map(|state| ResolvedView::new(state, StateSource::Hash))
    }

    fn from_bbox_param(&self, query: &QueryParams, layer_code: &str) -> Option<ResolvedView> {
        let bbox = BoundingBox::parse(query.get("bbox")?)?;
        Some(self.fit(bbox, layer_code, StateSource::BboxParam))
    }

    fn from_edge_params(&self, query: &QueryParams, layer_code: &str) -> Option<ResolvedView> {
        let bbox = BoundingBox::new(
            query.get_f64("minlon")?,
            query.get_f64("minlat")?,
            query.get_f64("maxlon")?,
            query.get_f64("maxlat")?,
        )
        .validated()?;
        Some(self.fit(bbox, layer_code, StateSource::EdgeParams))
    }

    fn from_marker(&self, query: &QueryParams, layer_code: &str) -> Option<ResolvedView> {
        let marker = LonLat::new(query.get_f64("mlon")?, query.get_f64("mlat")?);
        let mut view = self.point_view(query, marker, layer_code, StateSource::Marker)?;
        view.marker = Some(marker);
        Some(view)
    }

    fn from_point(&self, query: &QueryParams, layer_code: &str) -> Option<ResolvedView> {
        let point = LonLat::new(query.get_f64("lon")?, query.get_f64("lat")?);
        self.point_view(query, point, layer_code, StateSource::Point)
    }

    fn point_view(
        &self,
        query: &QueryParams,
        point: LonLat,
        layer_code: &str,
        source: StateSource,
    ) -> Option<ResolvedView> {
        if !point.is_valid() {
            return None;
        }

        // a zoom that is present but unusable rejects the tier
        let zoom = match query.get("zoom") {
            Some(zoom) => parse_zoom(zoom).filter(|zoom| *zoom <= self.max_zoom())?,
            None => self.config.point_zoom.min(self.max_zoom()),
        };

        let state = MapState::new(point.lon, point.lat, zoom).with_layers(layer_code);
        Some(ResolvedView::new(state, source))
    }

    fn from_stored(&self, stored: Option<MapState>) -> Option<ResolvedView> {
        let state = stored?;
        if !state.is_valid() || state.zoom > self.max_zoom() {
            log::debug!("ignoring invalid stored state {:?}", state);
            return None;
        }

        Some(ResolvedView::new(state, StateSource::Stored))
    }

    fn from_home(&self) -> Option<ResolvedView> {
        let home = self.config.home.filter(|home| home.is_valid())?;
        let zoom = self.config.home_zoom.min(self.max_zoom());
        let state = MapState::new(home.lon, home.lat, zoom);
        Some(ResolvedView::new(state, StateSource::Home))
    }

    fn default_state(&self) -> MapState {
        let mut view = self.config.default_view;
        if !LonLat::new(view.lon, view.lat).is_valid() {
            log::warn!("configured default view is out of range, using {:?}", DefaultView::default());
            view = DefaultView::default();
        }
        view.zoom = view.zoom.min(self.max_zoom());
        view.to_state()
    }

    fn from_timezone(&self, request: &ResolveRequest) -> Option<ResolvedView> {
        let timezone = request.timezone.as_deref()?;
        let bbox = self.timezones?.get(timezone).and_then(BoundingBox::validated);
        if bbox.is_none() {
            log::debug!("no bounds for time zone {}", timezone);
        }

        Some(self.fit(bbox?, "", StateSource::Timezone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HomePoint;
    use crate::store::MemoryStateStore;
    use crate::timezone::StaticTimezoneBounds;

    fn resolver<'a>() -> InitialStateResolver<'a> {
        InitialStateResolver::new(ViewConfig::default())
    }

    #[test]
    fn test_default_when_nothing_known() {
        let view = resolver().resolve_view(&ResolveRequest::new().with_timezone("Nowhere/Else"));
        assert_eq!(view.source, StateSource::Default);
        assert_eq!(view.state, MapState::new(0.0, 30.0, 3));
    }

    #[test]
    fn test_hash_beats_everything() {
        let store = MemoryStateStore::with_state(MapState::new(5.0, 5.0, 5).with_layers("C"));
        let resolver = resolver().with_store(&store);
        let request =
            ResolveRequest::from_url("/?bbox=-1,50,1,52&mlat=1&mlon=2#map=9/10/20&layers=T");

        let view = resolver.resolve_view(&request);
        assert_eq!(view.source, StateSource::Hash);
        assert_eq!(view.state, MapState::new(20.0, 10.0, 9).with_layers("T"));
    }

    #[test]
    fn test_invalid_hash_falls_through() {
        let request = ResolveRequest::from_url("/?lon=2&lat=3#map=99/10/20");
        let view = resolver().resolve_view(&request);
        assert_eq!(view.source, StateSource::Point);
        assert_eq!(view.state, MapState::new(2.0, 3.0, 12));
    }

    #[test]
    fn test_bbox_inherits_stored_layers() {
        let store = MemoryStateStore::with_state(MapState::new(5.0, 5.0, 5).with_layers("CN"));
        let resolver = resolver().with_store(&store);

        let view = resolver.resolve_view(&ResolveRequest::new().with_query("bbox=-10,-10,10,10"));
        assert_eq!(view.source, StateSource::BboxParam);
        assert_eq!(view.state, MapState::new(0.0, 0.0, 4).with_layers("CN"));
        assert_eq!(view.bounds, Some(BoundingBox::new(-10.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_malformed_bbox_uses_edge_params() {
        let request =
            ResolveRequest::new().with_query("bbox=1,2,3&minlon=-10&minlat=-10&maxlon=10&maxlat=10");
        let view = resolver().resolve_view(&request);
        assert_eq!(view.source, StateSource::EdgeParams);
        assert_eq!(view.state.zoom, 4);
    }

    #[test]
    fn test_marker_params() {
        let view = resolver().resolve_view(&ResolveRequest::new().with_query("mlat=51.5&mlon=-0.1"));
        assert_eq!(view.source, StateSource::Marker);
        assert_eq!(view.state, MapState::new(-0.1, 51.5, 12));
        assert_eq!(view.marker, Some(LonLat::new(-0.1, 51.5)));

        let view = resolver()
            .resolve_view(&ResolveRequest::new().with_query("mlat=51.5&mlon=-0.1&zoom=17"));
        assert_eq!(view.state.zoom, 17);
    }

    #[test]
    fn test_bad_zoom_rejects_point_tier() {
        let store = MemoryStateStore::with_state(MapState::new(5.0, 6.0, 7));
        let resolver = resolver().with_store(&store);

        let view = resolver.resolve_view(&ResolveRequest::new().with_query("lon=1&lat=2&zoom=1.5"));
        assert_eq!(view.source, StateSource::Stored);
        assert_eq!(view.state, MapState::new(5.0, 6.0, 7));
    }

    #[test]
    fn test_home_then_timezone() {
        let mut timezones = StaticTimezoneBounds::new();
        timezones.insert("Europe/Paris", BoundingBox::new(-5.0, 42.0, 8.0, 51.0));
        let request = ResolveRequest::new().with_timezone("Europe/Paris");

        let config = ViewConfig::default().with_home(HomePoint::new(1.0, 2.0));
        let home = InitialStateResolver::new(config)
            .with_timezones(&timezones)
            .resolve_view(&request);
        assert_eq!(home.source, StateSource::Home);
        assert_eq!(home.state, MapState::new(1.0, 2.0, 15));

        let by_zone = resolver().with_timezones(&timezones).resolve_view(&request);
        assert_eq!(by_zone.source, StateSource::Timezone);
        assert_eq!(by_zone.state.lon, 1.5);
        assert_eq!(by_zone.state.lat, 46.5);
        assert_eq!(by_zone.state.layer_code, "");
    }

    #[test]
    fn test_configured_zooms_never_exceed_max_zoom() {
        let mut config = ViewConfig::default();
        config.point_zoom = 30;
        config.default_view = DefaultView {
            lon: 0.0,
            lat: 30.0,
            zoom: 25,
        };
        let resolver = InitialStateResolver::new(config);

        let point = resolver.resolve(&ResolveRequest::new().with_query("lon=1&lat=2"));
        assert_eq!(point, MapState::new(1.0, 2.0, 20));
        assert!(point.is_valid());
        assert_eq!(
            StateCodec::decode_hash(&StateCodec::encode_hash(&point)),
            Some(point)
        );

        let fallback = resolver.resolve(&ResolveRequest::new());
        assert_eq!(fallback, MapState::new(0.0, 30.0, 20));
        assert!(fallback.is_valid());
    }

    #[test]
    fn test_out_of_range_default_view_uses_hard_default() {
        let mut config = ViewConfig::default();
        config.default_view.lat = 120.0;

        let state = InitialStateResolver::new(config).resolve(&ResolveRequest::new());
        assert_eq!(state, MapState::new(0.0, 30.0, 3));
    }

    #[test]
    fn test_remember_writes_store() {
        let store = MemoryStateStore::new();
        let resolver = resolver().with_store(&store);
        let state = MapState::new(1.0, 2.0, 3).with_layers("M");

        resolver.remember(&state);
        let view = resolver.resolve_view(&ResolveRequest::new());
        assert_eq!(view.source, StateSource::Stored);
        assert_eq!(view.state, state);
    }
}
