use globe_rs::api::{GlobeStyle, Highlight, build_scene_frame};
use globe_rs::core::{GeoPoint, Orthographic, Viewport};
use globe_rs::data::WorldMap;

const WORLD: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "United States of America"},
         "geometry": {"type": "Polygon", "coordinates":
            [[[-25,-5],[-15,-5],[-15,5],[-25,5],[-25,-5]]]}},
        {"type": "Feature", "properties": {"name": "Monaco"},
         "geometry": {"type": "Polygon", "coordinates":
            [[[15,-5],[25,-5],[25,5],[15,5],[15,-5]]]}}
    ]
}"#;

fn fixture() -> (Orthographic, WorldMap, GlobeStyle, Viewport) {
    let viewport = Viewport::new(600, 400);
    let projection = Orthographic::fit_extent(viewport, 10.0).expect("fit");
    let world = WorldMap::from_geojson_str(WORLD).expect("world");
    (projection, world, GlobeStyle::default(), viewport)
}

fn highlight(country: &str, lon: f64, lat: f64) -> Highlight {
    Highlight {
        country: country.to_owned(),
        location: GeoPoint::new(lon, lat),
        label: format!("{country} GP"),
        arc: None,
    }
}

#[test]
fn sphere_is_drawn_first_with_rim_stroke() {
    let (projection, world, style, viewport) = fixture();
    let frame = build_scene_frame(&projection, &world, None, &style, viewport);
    frame.validate().expect("valid frame");

    let sphere = &frame.paths[0];
    assert_eq!(sphere.fill_color, style.sphere_fill);
    assert_eq!(sphere.stroke_color, style.rim_color);
    assert_eq!(sphere.stroke_width, style.rim_width);
}

#[test]
fn mapped_highlight_colors_exactly_one_country() {
    let (projection, world, style, viewport) = fixture();
    let h = highlight("USA", -20.0, 0.0);
    let frame = build_scene_frame(&projection, &world, Some(&h), &style, viewport);

    let highlighted: Vec<_> = frame
        .paths
        .iter()
        .skip(1) // sphere
        .filter(|p| p.fill_color == style.highlight_fill)
        .collect();
    assert_eq!(highlighted.len(), 1);

    // The USA fixture square sits west of the view center.
    let (cx, _) = projection.center();
    assert!(highlighted[0].points.iter().all(|(x, _)| *x < cx));
}

#[test]
fn unmatched_country_highlights_nothing() {
    let (projection, world, style, viewport) = fixture();
    let h = highlight("Atlantis", 0.0, 0.0);
    let frame = build_scene_frame(&projection, &world, Some(&h), &style, viewport);

    assert!(
        frame
            .paths
            .iter()
            .skip(1)
            .all(|p| p.fill_color == style.country_fill)
    );
    // Marker and label still draw; failing to match is not an error.
    assert_eq!(frame.markers.len(), 1);
    assert_eq!(frame.texts.len(), 1);
}

#[test]
fn no_highlight_means_no_marker_label_or_arc() {
    let (projection, world, style, viewport) = fixture();
    let frame = build_scene_frame(&projection, &world, None, &style, viewport);

    assert!(frame.markers.is_empty());
    assert!(frame.texts.is_empty());
    // Only border polylines, all border-styled.
    assert!(frame.polylines.iter().all(|l| l.color == style.border_color));
}

#[test]
fn arc_polylines_use_the_arc_style() {
    let (projection, world, style, viewport) = fixture();
    let mut h = highlight("Monaco", 20.0, 0.0);
    h.arc = Some((GeoPoint::new(-20.0, 0.0), GeoPoint::new(20.0, 0.0)));
    let frame = build_scene_frame(&projection, &world, Some(&h), &style, viewport);

    let arcs: Vec<_> = frame
        .polylines
        .iter()
        .filter(|l| l.color == style.arc_color)
        .collect();
    assert_eq!(arcs.len(), 1);
    assert_eq!(arcs[0].stroke_width, style.arc_width);

    // The arc runs between the projected endpoints.
    let from = projection.project(GeoPoint::new(-20.0, 0.0));
    let to = projection.project(GeoPoint::new(20.0, 0.0));
    let first = arcs[0].points.first().expect("non-empty arc");
    let last = arcs[0].points.last().expect("non-empty arc");
    assert!((first.0 - from.x).abs() < 1e-9 && (first.1 - from.y).abs() < 1e-9);
    assert!((last.0 - to.x).abs() < 1e-9 && (last.1 - to.y).abs() < 1e-9);
}

#[test]
fn marker_and_label_sit_at_the_projected_location() {
    let (projection, world, style, viewport) = fixture();
    let h = highlight("Monaco", 20.0, 0.0);
    let frame = build_scene_frame(&projection, &world, Some(&h), &style, viewport);

    let projected = projection.project(GeoPoint::new(20.0, 0.0));
    let marker = frame.markers[0];
    assert!((marker.x - projected.x).abs() < 1e-9);
    assert!((marker.y - projected.y).abs() < 1e-9);
    assert_eq!(marker.radius, style.marker_radius);

    let label = &frame.texts[0];
    assert_eq!(label.text, "Monaco GP");
    assert!((label.x - (projected.x + style.label_offset_x)).abs() < 1e-9);
}

#[test]
fn centered_location_projects_inside_the_canvas() {
    let (mut projection, world, style, viewport) = fixture();
    let target = GeoPoint::new(7.4206, 43.7347);
    projection
        .set_rotation(globe_rs::core::Rotation::facing(target, 0.0))
        .expect("rotation");
    let h = Highlight {
        country: "Monaco".to_owned(),
        location: target,
        label: "Monaco".to_owned(),
        arc: None,
    };
    let frame = build_scene_frame(&projection, &world, Some(&h), &style, viewport);
    let marker = frame.markers[0];
    assert!(marker.x >= 0.0 && marker.x <= f64::from(viewport.width));
    assert!(marker.y >= 0.0 && marker.y <= f64::from(viewport.height));
}

#[test]
fn antipodal_location_still_builds_a_valid_frame() {
    let (projection, world, style, viewport) = fixture();
    let h = highlight("Monaco", 180.0, 0.0);
    let frame = build_scene_frame(&projection, &world, Some(&h), &style, viewport);
    frame.validate().expect("frame stays valid");
}
