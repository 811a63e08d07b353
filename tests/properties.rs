use mapstate::prelude::*;
use proptest::prelude::*;

fn state_strategy() -> impl Strategy<Value = MapState> {
    (-180.0..180.0f64, -90.0..90.0f64, 0u8..=20, "[A-Z]{0,3}")
        .prop_map(|(lon, lat, zoom, layers)| MapState::new(lon, lat, zoom).with_layers(layers))
}

fn bbox_strategy() -> impl Strategy<Value = BoundingBox> {
    (-170.0..170.0f64, -80.0..80.0f64, 0.0001..10.0f64, 0.0001..10.0f64)
        .prop_map(|(lon, lat, width, height)| BoundingBox::new(lon, lat, lon + width, lat + height))
}

proptest! {
    #[test]
    fn hash_decodes_to_the_rounded_state(state in state_strategy()) {
        let decoded = StateCodec::decode_hash(&StateCodec::encode_hash(&state));
        prop_assert_eq!(decoded, Some(StateCodec::rounded(&state)));
    }

    #[test]
    fn short_link_keeps_zoom_and_stays_close(
        lon in -179.9..179.9f64,
        lat in -89.9..89.9f64,
        zoom in 0u8..=20,
    ) {
        let token = ShortLinkCodec::encode(lon, lat, zoom).unwrap();
        let decoded = ShortLinkCodec::decode(&token).unwrap();
        let tolerance = 180.0 / 2_f64.powi(zoom as i32);

        prop_assert_eq!(decoded.zoom, zoom);
        prop_assert!((decoded.lon - lon).abs() <= tolerance);
        prop_assert!((decoded.lat - lat).abs() <= tolerance);
        prop_assert!((-180.0..180.0).contains(&decoded.lon));
        prop_assert!((-90.0..90.0).contains(&decoded.lat));
    }

    #[test]
    fn short_link_accepts_at_sign_for_tilde(
        lon in -179.9..179.9f64,
        lat in -89.9..89.9f64,
        zoom in 0u8..=20,
    ) {
        let token = ShortLinkCodec::encode(lon, lat, zoom).unwrap();
        let aliased = token.replace('~', "@");
        prop_assert_eq!(ShortLinkCodec::decode(&aliased).unwrap(), ShortLinkCodec::decode(&token).unwrap());
    }

    #[test]
    fn smaller_boxes_never_fit_at_a_lower_zoom(
        outer in bbox_strategy(),
        shrink in 0.0..0.49f64,
    ) {
        let dx = (outer.max_lon - outer.min_lon) * shrink;
        let dy = (outer.max_lat - outer.min_lat) * shrink;
        let inner = BoundingBox::new(
            outer.min_lon + dx,
            outer.min_lat + dy,
            outer.max_lon - dx,
            outer.max_lat - dy,
        );

        let fitter = ViewportFitter::new(1024, 768);
        prop_assert!(fitter.fit_zoom(&inner, None) >= fitter.fit_zoom(&outer, None));
    }

    #[test]
    fn location_string_round_trips(state in state_strategy()) {
        prop_assert_eq!(decode_location(&encode_location(&state)), Some(state));
    }
}
