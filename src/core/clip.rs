//! Hemisphere clipping for the orthographic view.
//!
//! Works in view-space cartesian coordinates where the front hemisphere is
//! the half-space `x > 0` and the horizon is the unit circle in the y/z
//! plane, which projects exactly onto the sphere's rim.

use crate::core::projection::Orthographic;
use crate::core::types::GeoPoint;

/// Angular step used when tracing along the horizon rim, radians.
const RIM_STEP: f64 = 0.035;

/// Result of clipping one polygon ring against the front hemisphere.
#[derive(Debug, Clone, PartialEq)]
pub enum ClippedRing {
    /// The entire ring is on the back hemisphere.
    Hidden,
    /// Screen-space outline of the visible part, closed implicitly.
    Visible(Vec<(f64, f64)>),
}

/// Clips a polygon ring and returns its visible screen-space outline.
///
/// Fully visible rings project directly. Rings crossing the horizon are cut
/// at the `x = 0` plane and closed by joining each exit point to the next
/// entry point along the shorter rim arc, which keeps fills closed for
/// country-scale rings.
#[must_use]
pub fn clip_ring(projection: &Orthographic, ring: &[GeoPoint]) -> ClippedRing {
    let mut view: Vec<[f64; 3]> = ring.iter().map(|p| projection.rotate_to_view(*p)).collect();
    // Treat an explicitly closed ring as open; closure is implicit below.
    if view.len() > 1 {
        let first = view[0];
        let last = view[view.len() - 1];
        if (first[0] - last[0]).abs() < 1e-12
            && (first[1] - last[1]).abs() < 1e-12
            && (first[2] - last[2]).abs() < 1e-12
        {
            view.pop();
        }
    }
    if view.len() < 3 {
        return ClippedRing::Hidden;
    }

    let any_hidden = view.iter().any(|v| v[0] <= 0.0);
    if !any_hidden {
        let points = view.iter().map(|v| projection.view_to_screen(*v)).collect();
        return ClippedRing::Visible(points);
    }
    if view.iter().all(|v| v[0] <= 0.0) {
        return ClippedRing::Hidden;
    }

    // Mixed ring: start the walk at a visible vertex so every hidden stretch
    // is bracketed by an exit and an entry crossing.
    let n = view.len();
    let start = view
        .iter()
        .position(|v| v[0] > 0.0)
        .unwrap_or(0);

    let mut points: Vec<(f64, f64)> = Vec::with_capacity(n + 16);
    let mut pending_exit: Option<f64> = None;

    for offset in 0..n {
        let a = view[(start + offset) % n];
        let b = view[(start + offset + 1) % n];
        let a_visible = a[0] > 0.0;
        let b_visible = b[0] > 0.0;

        if a_visible {
            points.push(projection.view_to_screen(a));
        }
        if a_visible != b_visible {
            let crossing = horizon_crossing(a, b);
            let theta = crossing[2].atan2(crossing[1]);
            if a_visible {
                // Leaving the front hemisphere.
                points.push(projection.view_to_screen(crossing));
                pending_exit = Some(theta);
            } else {
                // Re-entering: close the gap along the rim first.
                if let Some(exit_theta) = pending_exit.take() {
                    append_rim_arc(projection, &mut points, exit_theta, theta);
                }
                points.push(projection.view_to_screen(crossing));
            }
        }
    }

    ClippedRing::Visible(points)
}

/// Clips an open line string, splitting it into visible screen-space
/// segments at horizon crossings.
#[must_use]
pub fn clip_line_string(projection: &Orthographic, line: &[GeoPoint]) -> Vec<Vec<(f64, f64)>> {
    let view: Vec<[f64; 3]> = line.iter().map(|p| projection.rotate_to_view(*p)).collect();
    let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, v) in view.iter().enumerate() {
        let visible = v[0] > 0.0;
        if visible {
            if current.is_empty() && i > 0 && view[i - 1][0] <= 0.0 {
                let crossing = horizon_crossing(view[i - 1], *v);
                current.push(projection.view_to_screen(crossing));
            }
            current.push(projection.view_to_screen(*v));
            if let Some(next) = view.get(i + 1) {
                if next[0] <= 0.0 {
                    let crossing = horizon_crossing(*v, *next);
                    current.push(projection.view_to_screen(crossing));
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if current.len() > 1 {
        segments.push(current);
    }
    segments.retain(|segment| segment.len() > 1);
    segments
}

/// Densifies the great circle between `from` and `to` by spherical linear
/// interpolation, endpoints included.
#[must_use]
pub fn sample_great_circle(from: GeoPoint, to: GeoPoint, step_deg: f64) -> Vec<GeoPoint> {
    let a = from.to_cartesian();
    let b = to.to_cartesian();
    let dot = (a[0] * b[0] + a[1] * b[1] + a[2] * b[2]).clamp(-1.0, 1.0);
    let delta = dot.acos();

    let step = step_deg.max(1e-3).to_radians();
    let n = (delta / step).ceil() as usize;
    if n <= 1 || delta.sin().abs() < 1e-9 {
        return vec![from, to];
    }

    let sin_delta = delta.sin();
    let mut points = Vec::with_capacity(n + 1);
    points.push(from);
    for i in 1..n {
        let t = i as f64 / n as f64;
        let wa = ((1.0 - t) * delta).sin() / sin_delta;
        let wb = (t * delta).sin() / sin_delta;
        points.push(GeoPoint::from_cartesian([
            wa * a[0] + wb * b[0],
            wa * a[1] + wb * b[1],
            wa * a[2] + wb * b[2],
        ]));
    }
    points.push(to);
    points
}

/// Intersection of the chord `a -> b` with the horizon plane, normalized back
/// onto the unit sphere. Callers guarantee the endpoints straddle the plane.
fn horizon_crossing(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    let t = a[0] / (a[0] - b[0]);
    let p = [
        0.0,
        a[1] + t * (b[1] - a[1]),
        a[2] + t * (b[2] - a[2]),
    ];
    let norm = (p[1] * p[1] + p[2] * p[2]).sqrt();
    if norm < 1e-12 {
        return [0.0, 1.0, 0.0];
    }
    [0.0, p[1] / norm, p[2] / norm]
}

fn append_rim_arc(
    projection: &Orthographic,
    points: &mut Vec<(f64, f64)>,
    from_theta: f64,
    to_theta: f64,
) {
    let mut delta = to_theta - from_theta;
    if delta > std::f64::consts::PI {
        delta -= std::f64::consts::TAU;
    } else if delta < -std::f64::consts::PI {
        delta += std::f64::consts::TAU;
    }

    let steps = (delta.abs() / RIM_STEP).ceil() as usize;
    for i in 1..steps {
        let theta = from_theta + delta * (i as f64 / steps as f64);
        points.push(projection.rim_point(theta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Viewport;

    fn projection() -> Orthographic {
        Orthographic::fit_extent(Viewport::new(600, 400), 10.0).expect("fit")
    }

    fn square_ring(center_lon: f64, center_lat: f64, half: f64) -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(center_lon - half, center_lat - half),
            GeoPoint::new(center_lon + half, center_lat - half),
            GeoPoint::new(center_lon + half, center_lat + half),
            GeoPoint::new(center_lon - half, center_lat + half),
        ]
    }

    #[test]
    fn front_ring_projects_all_vertices() {
        let ring = square_ring(0.0, 0.0, 5.0);
        match clip_ring(&projection(), &ring) {
            ClippedRing::Visible(points) => assert_eq!(points.len(), ring.len()),
            ClippedRing::Hidden => panic!("front ring must be visible"),
        }
    }

    #[test]
    fn back_ring_is_hidden() {
        let ring = square_ring(180.0, 0.0, 5.0);
        assert_eq!(clip_ring(&projection(), &ring), ClippedRing::Hidden);
    }

    #[test]
    fn straddling_ring_is_cut_at_the_rim() {
        let projection = projection();
        let radius = projection.radius();
        let (cx, _) = projection.center();
        // A ring straddling the 90°E horizon meridian.
        let ring = square_ring(90.0, 0.0, 10.0);
        match clip_ring(&projection, &ring) {
            ClippedRing::Visible(points) => {
                assert!(points.len() >= 3);
                for (x, _) in points {
                    assert!(x <= cx + radius + 1e-6);
                }
            }
            ClippedRing::Hidden => panic!("straddling ring must keep a visible part"),
        }
    }

    #[test]
    fn line_string_splits_at_the_horizon() {
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(60.0, 0.0),
            GeoPoint::new(120.0, 0.0),
        ];
        let segments = clip_line_string(&projection(), &line);
        assert_eq!(segments.len(), 1);
        // Visible part runs from 0°E out to the horizon crossing.
        assert!(segments[0].len() >= 3);
    }

    #[test]
    fn great_circle_samples_stay_on_the_sphere() {
        let samples = sample_great_circle(
            GeoPoint::new(-115.01, 36.27),
            GeoPoint::new(7.4206, 43.7347),
            2.0,
        );
        assert!(samples.len() > 2);
        assert_eq!(samples[0], GeoPoint::new(-115.01, 36.27));
        assert_eq!(*samples.last().expect("non-empty"), GeoPoint::new(7.4206, 43.7347));
        for p in samples {
            let v = p.to_cartesian();
            let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }
}
