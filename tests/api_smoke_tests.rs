use globe_rs::api::{GlobeConfig, GlobeEngine, GlobeStyle};
use globe_rs::core::Viewport;
use globe_rs::data::{WorldMap, parse_circuits_csv};
use globe_rs::render::{Color, NullRenderer};

const WORLD: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "United States of America"},
         "geometry": {"type": "Polygon", "coordinates":
            [[[-120,30],[-110,30],[-110,40],[-120,40],[-120,30]]]}},
        {"type": "Feature", "properties": {"name": "Monaco"},
         "geometry": {"type": "Polygon", "coordinates":
            [[[7,43],[8,43],[8,44],[7,44],[7,43]]]}}
    ]
}"#;

const CIRCUITS: &str = "\
country,lat,lng,name
USA,36.27,-115.01,Las Vegas
Monaco,43.7347,7.4206,Monaco
";

#[test]
fn engine_smoke_flow() {
    let world = WorldMap::from_geojson_str(WORLD).expect("world");
    let circuits = parse_circuits_csv(CIRCUITS).expect("circuits");

    let renderer = NullRenderer::default();
    let config = GlobeConfig::new(Viewport::new(600, 400));
    let mut engine = GlobeEngine::new(renderer, config, world, circuits).expect("engine init");

    assert_eq!(engine.tour().steps().len(), 2);
    assert_eq!(engine.tour().total_duration_ms(), 2000.0 + 1250.0);

    // At time zero the first step is already active.
    engine.render_at(0.0).expect("initial render");
    assert_eq!(engine.status_line(0.0), "Country: USA | Circuit: Las Vegas");

    // Mid-tour render with the second circuit active.
    engine.render_at(2500.0).expect("mid-tour render");
    assert_eq!(engine.status_line(2500.0), "Country: Monaco | Circuit: Monaco");

    let renderer = engine.into_renderer();
    assert!(renderer.last_path_count >= 2); // sphere + at least the facing country
    assert_eq!(renderer.last_marker_count, 1);
    assert_eq!(renderer.last_text_count, 1);
}

#[test]
fn custom_style_is_validated() {
    let world = WorldMap::from_geojson_str(WORLD).expect("world");
    let config = GlobeConfig::new(Viewport::new(600, 400));
    let mut engine =
        GlobeEngine::new(NullRenderer::default(), config, world, Vec::new()).expect("engine");

    let mut style = GlobeStyle::default();
    style.marker_radius = -1.0;
    assert!(engine.set_style(style).is_err());

    let mut style = GlobeStyle::default();
    style.highlight_fill = Color::rgb(1.0, 0.5, 0.0);
    engine.set_style(style).expect("valid style");
    assert_eq!(engine.style().highlight_fill, Color::rgb(1.0, 0.5, 0.0));
}

#[test]
fn empty_tour_renders_the_resting_globe() {
    let world = WorldMap::from_geojson_str(WORLD).expect("world");
    let config = GlobeConfig::new(Viewport::new(600, 400));
    let mut engine =
        GlobeEngine::new(NullRenderer::default(), config, world, Vec::new()).expect("engine");

    assert!(engine.tour().is_empty());
    assert_eq!(engine.tour().total_duration_ms(), 0.0);
    assert_eq!(engine.status_line(10_000.0), "");

    engine.render_at(0.0).expect("render");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.last_marker_count, 0);
    assert_eq!(renderer.last_text_count, 0);
}

#[test]
fn invalid_config_never_builds_an_engine() {
    let world = WorldMap::from_geojson_str(WORLD).expect("world");
    let config = GlobeConfig::new(Viewport::new(600, 400)).with_timing(500.0, 1250.0);
    let result = GlobeEngine::new(NullRenderer::default(), config, world, Vec::new());
    assert!(result.is_err());
}
