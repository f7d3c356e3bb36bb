use crate::core::types::{GeoPoint, Rotation, Viewport};
use crate::error::{GlobeError, GlobeResult};

/// A geographic point mapped to pixel space.
///
/// `visible` reports whether the point lies on the front hemisphere for the
/// current rotation. Back-hemisphere points still get coordinates (the
/// orthographic forward map is total), they just must not be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

/// Orthographic ("globe") projection with a d3-style three-angle rotation.
///
/// The projection owns the current [`Rotation`] plus the pixel-space scale and
/// translate fitted from a viewport. All spherical math happens in rotated
/// cartesian space where the view axis is +x, the screen-right axis is +y and
/// the screen-up axis is +z; the front hemisphere is exactly `x > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    rotation: Rotation,
    scale: f64,
    translate_x: f64,
    translate_y: f64,
    // Cached trig for the current rotation.
    sin_lambda: f64,
    cos_lambda: f64,
    sin_phi: f64,
    cos_phi: f64,
    sin_gamma: f64,
    cos_gamma: f64,
}

impl Orthographic {
    /// Fits the sphere into `viewport` inset by `margin_px` on every side,
    /// centered, with no rotation.
    pub fn fit_extent(viewport: Viewport, margin_px: f64) -> GlobeResult<Self> {
        if !viewport.is_valid() {
            return Err(GlobeError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !margin_px.is_finite() || margin_px < 0.0 {
            return Err(GlobeError::InvalidData(
                "projection margin must be finite and >= 0".to_owned(),
            ));
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let diameter = (width - 2.0 * margin_px).min(height - 2.0 * margin_px);
        if diameter <= 0.0 {
            return Err(GlobeError::InvalidData(format!(
                "margin {margin_px}px leaves no room in a {}x{} viewport",
                viewport.width, viewport.height
            )));
        }

        let mut projection = Self {
            rotation: Rotation::default(),
            scale: diameter / 2.0,
            translate_x: width / 2.0,
            translate_y: height / 2.0,
            sin_lambda: 0.0,
            cos_lambda: 1.0,
            sin_phi: 0.0,
            cos_phi: 1.0,
            sin_gamma: 0.0,
            cos_gamma: 1.0,
        };
        projection.set_rotation(Rotation::default())?;
        Ok(projection)
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) -> GlobeResult<()> {
        if !rotation.is_finite() {
            return Err(GlobeError::InvalidData(
                "rotation angles must be finite".to_owned(),
            ));
        }
        self.rotation = rotation;
        let (sin_lambda, cos_lambda) = rotation.lambda.to_radians().sin_cos();
        let (sin_phi, cos_phi) = rotation.phi.to_radians().sin_cos();
        let (sin_gamma, cos_gamma) = rotation.gamma.to_radians().sin_cos();
        self.sin_lambda = sin_lambda;
        self.cos_lambda = cos_lambda;
        self.sin_phi = sin_phi;
        self.cos_phi = cos_phi;
        self.sin_gamma = sin_gamma;
        self.cos_gamma = cos_gamma;
        Ok(())
    }

    /// Sphere radius in pixels.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.scale
    }

    /// Pixel coordinates of the sphere center.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.translate_x, self.translate_y)
    }

    /// Applies the rotation and returns view-space cartesian coordinates.
    #[must_use]
    pub fn rotate_to_view(&self, point: GeoPoint) -> [f64; 3] {
        let [x0, y0, z0] = point.to_cartesian();

        // Spin around the polar axis (lambda).
        let x1 = x0 * self.cos_lambda - y0 * self.sin_lambda;
        let y1 = x0 * self.sin_lambda + y0 * self.cos_lambda;
        let z1 = z0;

        // Tilt toward the viewer (phi): rotation in the x/z plane.
        let x2 = x1 * self.cos_phi - z1 * self.sin_phi;
        let y2 = y1;
        let z2 = z1 * self.cos_phi + x1 * self.sin_phi;

        // Roll around the view axis (gamma): rotation in the y/z plane.
        let y3 = y2 * self.cos_gamma - z2 * self.sin_gamma;
        let z3 = y2 * self.sin_gamma + z2 * self.cos_gamma;

        [x2, y3, z3]
    }

    /// Maps a view-space cartesian point onto the screen.
    #[must_use]
    pub fn view_to_screen(&self, v: [f64; 3]) -> (f64, f64) {
        (
            self.translate_x + self.scale * v[1],
            self.translate_y - self.scale * v[2],
        )
    }

    #[must_use]
    pub fn project(&self, point: GeoPoint) -> ProjectedPoint {
        let v = self.rotate_to_view(point);
        let (x, y) = self.view_to_screen(v);
        ProjectedPoint {
            x,
            y,
            visible: v[0] > 0.0,
        }
    }

    /// Screen position of a point on the horizon rim at angle `theta`
    /// (counter-clockwise from screen-right).
    #[must_use]
    pub fn rim_point(&self, theta: f64) -> (f64, f64) {
        self.view_to_screen([0.0, theta.cos(), theta.sin()])
    }
}
