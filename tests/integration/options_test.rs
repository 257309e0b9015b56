use record_mapper::{
    DEFAULT_MAX_DEPTH, ErrorReason, HARD_DEPTH_LIMIT, MapOption, MapOptions, Mappable, map,
    map_with_options,
};

use crate::utils::{
    Geo, GeoResponse, NodeView, PatchUserRequest, User, UserResponse, chain, sample_user,
    view_depth,
};

#[derive(Debug, Default, Mappable)]
struct GeoWithAltitude {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

#[test]
fn test_strict_mode_requires_every_destination_field() {
    let geo = Geo {
        latitude: 1.5,
        longitude: 2.5,
    };
    let mut target = GeoWithAltitude {
        altitude: 99.0,
        ..GeoWithAltitude::default()
    };

    let err = map_with_options(&mut target, &geo, &MapOptions::new().with_strict_mode())
        .unwrap_err();

    assert_eq!(err.reason, ErrorReason::UnmappedField);
    assert_eq!(err.field_path, "altitude");
    assert_eq!(err.src_type, "Geo");
    assert_eq!(err.dst_type, "GeoWithAltitude");
    // Matched fields were still copied before the check
    assert_eq!(target.latitude, 1.5);
    assert_eq!(target.altitude, 99.0);
}

#[test]
fn test_non_strict_mode_tolerates_unmatched_fields() {
    let geo = Geo {
        latitude: 1.5,
        longitude: 2.5,
    };
    let mut target = GeoWithAltitude::default();

    map(&mut target, &geo).unwrap();

    assert_eq!(target.longitude, 2.5);
    assert_eq!(target.altitude, 0.0);
}

#[test]
fn test_strict_mode_reports_nested_paths() {
    #[derive(Debug, Default, Mappable)]
    struct Place {
        geo: Geo,
    }

    #[derive(Debug, Default, Mappable)]
    struct PlaceView {
        geo: GeoWithAltitude,
    }

    let mut view = PlaceView::default();
    let err = map_with_options(
        &mut view,
        &Place::default(),
        &MapOptions::new().with_strict_mode(),
    )
    .unwrap_err();

    assert_eq!(err.field_path, "geo.altitude");
    assert_eq!(err.src_type, "Geo");
    assert_eq!(err.dst_type, "GeoWithAltitude");
}

#[test]
fn test_ignore_zero_source_keeps_destination_values() {
    let patch = PatchUserRequest {
        email: "new@example.com".into(),
        ..PatchUserRequest::default()
    };
    let mut user = sample_user();

    map_with_options(&mut user, &patch, &MapOptions::new().with_ignore_zero_source()).unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.name, "Leanne Graham");
    assert_eq!(user.website, "hildegard.org");
}

#[test]
fn test_without_ignore_zero_source_zeros_overwrite() {
    let patch = PatchUserRequest {
        email: "new@example.com".into(),
        ..PatchUserRequest::default()
    };
    let mut user = sample_user();

    map(&mut user, &patch).unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.name, "");
}

#[test]
fn test_negative_zero_is_not_a_zero_value() {
    let geo = Geo {
        latitude: -0.0,
        longitude: 0.0,
    };
    let mut target = GeoResponse {
        latitude: 5.0,
        longitude: 5.0,
    };

    map_with_options(&mut target, &geo, &MapOptions::new().with_ignore_zero_source()).unwrap();

    assert!(target.latitude.is_sign_negative());
    assert_eq!(target.longitude, 5.0);
}

#[test]
fn test_strict_mode_counts_zero_skipped_fields_as_unmapped() {
    let patch = PatchUserRequest {
        name: "Ervin Howell".into(),
        email: "Shanna@melissa.tv".into(),
        ..PatchUserRequest::default()
    };
    let options: MapOptions = [MapOption::StrictMode, MapOption::IgnoreZeroSource]
        .into_iter()
        .collect();

    let mut target = PatchUserRequest::default();
    let err = map_with_options(&mut target, &patch, &options).unwrap_err();

    assert_eq!(err.reason, ErrorReason::UnmappedField);
    assert_eq!(err.field_path, "username");
    assert!(err.detail.unwrap().contains("source value is zero"));
    // Non-zero fields were still applied
    assert_eq!(target.email, "Shanna@melissa.tv");
}

#[test]
fn test_user_response_needs_no_zero_check_when_fully_populated() {
    let options = MapOptions::new()
        .with_strict_mode()
        .with_ignore_zero_source();
    let mut response = UserResponse::default();

    map_with_options(&mut response, &sample_user(), &options).unwrap();

    assert_eq!(response.username, "Bret");
}

#[test]
fn test_depth_budget_is_exact() {
    for depth in [1, 3, 7] {
        let source = chain(depth);

        let mut view = NodeView::default();
        map_with_options(&mut view, &source, &MapOptions::new().with_max_depth(depth))
            .unwrap_or_else(|err| panic!("depth {depth} should fit: {err}"));
        assert_eq!(view_depth(&view), depth);

        let mut view = NodeView::default();
        let err = map_with_options(
            &mut view,
            &source,
            &MapOptions::new().with_max_depth(depth - 1),
        )
        .unwrap_err();
        assert_eq!(err.reason, ErrorReason::MaxDepthExceeded);
        assert_eq!(err.src_type, "Node");
        assert_eq!(err.dst_type, "NodeView");
    }
}

#[test]
fn test_max_depth_error_points_at_the_offending_record() {
    let mut view = NodeView::default();
    let err = map_with_options(&mut view, &chain(3), &MapOptions::new().with_max_depth(1))
        .unwrap_err();

    assert_eq!(err.field_path, "children[0].children[0]");
    assert_eq!(err.detail.as_deref(), Some("depth 2 exceeds limit 1"));
}

#[test]
fn test_options_default_depth_is_ten() {
    let mut view = NodeView::default();
    map_with_options(&mut view, &chain(DEFAULT_MAX_DEPTH), &MapOptions::new()).unwrap();

    let mut view = NodeView::default();
    let err = map_with_options(&mut view, &chain(DEFAULT_MAX_DEPTH + 1), &MapOptions::new())
        .unwrap_err();
    assert_eq!(err.reason, ErrorReason::MaxDepthExceeded);
}

#[test]
fn test_basic_mapping_stops_at_the_hard_ceiling() {
    let mut view = NodeView::default();
    map(&mut view, &chain(HARD_DEPTH_LIMIT)).unwrap();
    assert_eq!(view_depth(&view), HARD_DEPTH_LIMIT);

    let mut view = NodeView::default();
    let err = map(&mut view, &chain(HARD_DEPTH_LIMIT + 6)).unwrap_err();
    assert_eq!(err.reason, ErrorReason::MaxDepthExceeded);
    assert!(err.field_path.starts_with("children[0].children[0]"));

    // Asking for more than the ceiling does not lift it
    let mut view = NodeView::default();
    let err = map_with_options(
        &mut view,
        &chain(HARD_DEPTH_LIMIT + 1),
        &MapOptions::new().with_max_depth(1_000),
    )
    .unwrap_err();
    assert_eq!(err.reason, ErrorReason::MaxDepthExceeded);
}

#[test]
fn test_same_type_mapping_copies_everything() {
    let source = sample_user();
    let mut copy = User::default();

    map_with_options(&mut copy, &source, &MapOptions::new().with_strict_mode()).unwrap();

    assert_eq!(copy, source);
}
