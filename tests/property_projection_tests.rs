use approx::assert_relative_eq;
use globe_rs::core::{GeoPoint, Orthographic, Rotation, Viewport};
use proptest::prelude::*;

proptest! {
    #[test]
    fn projected_points_stay_on_the_disk(
        lon in -180.0f64..180.0,
        lat in -90.0f64..90.0,
        lambda in -360.0f64..360.0,
        phi in -360.0f64..360.0,
        gamma in -360.0f64..360.0
    ) {
        let mut projection =
            Orthographic::fit_extent(Viewport::new(800, 720), 10.0).expect("fit");
        projection
            .set_rotation(Rotation::new(lambda, phi, gamma))
            .expect("rotation");

        let p = projection.project(GeoPoint::new(lon, lat));
        let (cx, cy) = projection.center();
        let distance = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
        prop_assert!(distance <= projection.radius() + 1e-6);
    }

    #[test]
    fn cartesian_round_trip(
        lon in -179.9f64..179.9,
        lat in -89.9f64..89.9
    ) {
        let point = GeoPoint::new(lon, lat);
        let back = GeoPoint::from_cartesian(point.to_cartesian());
        prop_assert!((back.lon - lon).abs() <= 1e-9);
        prop_assert!((back.lat - lat).abs() <= 1e-9);
    }

    #[test]
    fn facing_rotation_always_centers_its_target(
        lon in -180.0f64..180.0,
        lat in -90.0f64..90.0,
        tilt in -45.0f64..45.0
    ) {
        let mut projection =
            Orthographic::fit_extent(Viewport::new(600, 400), 10.0).expect("fit");
        projection
            .set_rotation(Rotation::facing(GeoPoint::new(lon, lat), tilt))
            .expect("rotation");

        // With the tour tilt the target sits on the center meridian, offset
        // vertically by the tilt angle.
        let p = projection.project(GeoPoint::new(lon, lat));
        let (cx, _) = projection.center();
        prop_assert!((p.x - cx).abs() <= 1e-6);
        prop_assert!(p.visible);
    }
}

#[test]
fn zero_tilt_facing_puts_the_target_at_the_exact_center() {
    let mut projection = Orthographic::fit_extent(Viewport::new(600, 400), 10.0).expect("fit");
    let target = GeoPoint::new(-115.01, 36.27);
    projection
        .set_rotation(Rotation::facing(target, 0.0))
        .expect("rotation");
    let p = projection.project(target);
    let (cx, cy) = projection.center();
    assert_relative_eq!(p.x, cx, epsilon = 1e-9);
    assert_relative_eq!(p.y, cy, epsilon = 1e-9);
}
