use globe_rs::core::Viewport;
use globe_rs::render::{
    Color, MarkerPrimitive, NullRenderer, PathPrimitive, PolylinePrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

fn triangle(fill: Color) -> PathPrimitive {
    PathPrimitive::filled(vec![(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)], fill)
}

#[test]
fn empty_frame_is_valid_and_empty() {
    let frame = RenderFrame::new(Viewport::new(600, 400));
    frame.validate().expect("valid");
    assert!(frame.is_empty());
}

#[test]
fn builder_methods_accumulate_primitives() {
    let white = Color::rgb(1.0, 1.0, 1.0);
    let frame = RenderFrame::new(Viewport::new(600, 400))
        .with_path(triangle(Color::rgb(0.267, 0.267, 0.267)))
        .with_polyline(PolylinePrimitive::new(
            vec![(0.0, 0.0), (10.0, 10.0)],
            0.5,
            white,
        ))
        .with_marker(MarkerPrimitive::new(5.0, 5.0, 5.0, Color::rgb(1.0, 0.0, 0.0)))
        .with_text(TextPrimitive::new(
            "Monza",
            12.0,
            5.0,
            14.0,
            white,
            TextHAlign::Left,
        ));

    frame.validate().expect("valid");
    assert!(!frame.is_empty());

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_path_count, 1);
    assert_eq!(renderer.last_polyline_count, 1);
    assert_eq!(renderer.last_marker_count, 1);
    assert_eq!(renderer.last_text_count, 1);
}

#[test]
fn invalid_viewport_fails_validation() {
    let frame = RenderFrame::new(Viewport::new(0, 400));
    assert!(frame.validate().is_err());
}

#[test]
fn degenerate_primitives_fail_validation() {
    let white = Color::rgb(1.0, 1.0, 1.0);
    let viewport = Viewport::new(600, 400);

    let two_point_path = PathPrimitive::filled(vec![(0.0, 0.0), (1.0, 1.0)], white);
    assert!(
        RenderFrame::new(viewport)
            .with_path(two_point_path)
            .validate()
            .is_err()
    );

    let single_point_line = PolylinePrimitive::new(vec![(0.0, 0.0)], 1.0, white);
    assert!(
        RenderFrame::new(viewport)
            .with_polyline(single_point_line)
            .validate()
            .is_err()
    );

    let flat_marker = MarkerPrimitive::new(1.0, 1.0, 0.0, white);
    assert!(
        RenderFrame::new(viewport)
            .with_marker(flat_marker)
            .validate()
            .is_err()
    );

    let empty_text = TextPrimitive::new("", 0.0, 0.0, 14.0, white, TextHAlign::Left);
    assert!(
        RenderFrame::new(viewport)
            .with_text(empty_text)
            .validate()
            .is_err()
    );
}

#[test]
fn out_of_range_colors_are_rejected() {
    assert!(Color::rgba(1.5, 0.0, 0.0, 1.0).validate().is_err());
    assert!(Color::rgba(0.0, -0.1, 0.0, 1.0).validate().is_err());
    assert!(Color::rgba(0.0, 0.0, f64::NAN, 1.0).validate().is_err());
    assert!(Color::rgb(0.733, 0.733, 0.733).validate().is_ok());
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let white = Color::rgb(1.0, 1.0, 1.0);
    let path = PathPrimitive::filled(vec![(0.0, 0.0), (f64::NAN, 0.0), (5.0, 8.0)], white);
    assert!(path.validate().is_err());

    let line = PolylinePrimitive::new(vec![(0.0, 0.0), (f64::INFINITY, 1.0)], 1.0, white);
    assert!(line.validate().is_err());
}
