use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Geographic coordinate in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Unit-sphere cartesian coordinates, x toward (0°, 0°), z toward the north pole.
    #[must_use]
    pub fn to_cartesian(self) -> [f64; 3] {
        let lon = self.lon.to_radians();
        let lat = self.lat.to_radians();
        let cos_lat = lat.cos();
        [cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin()]
    }

    #[must_use]
    pub fn from_cartesian(v: [f64; 3]) -> Self {
        Self {
            lon: v[1].atan2(v[0]).to_degrees(),
            lat: v[2].clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }
}

/// Globe orientation as the three d3-style rotation angles, in degrees.
///
/// `lambda` spins around the polar axis, `phi` tilts the pole toward or away
/// from the viewer, `gamma` rolls around the view axis (normally zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotation {
    pub lambda: f64,
    pub phi: f64,
    pub gamma: f64,
}

impl Rotation {
    #[must_use]
    pub const fn new(lambda: f64, phi: f64, gamma: f64) -> Self {
        Self { lambda, phi, gamma }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lambda.is_finite() && self.phi.is_finite() && self.gamma.is_finite()
    }

    /// Rotation that centers the view on `target`, with the given tilt offset.
    ///
    /// The marker-facing orientation used by the tour: `[-lon, tilt - lat]`.
    #[must_use]
    pub fn facing(target: GeoPoint, tilt_deg: f64) -> Self {
        Self::new(-target.lon, tilt_deg - target.lat, 0.0)
    }
}
