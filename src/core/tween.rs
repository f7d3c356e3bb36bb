use crate::core::types::Rotation;
use crate::error::{GlobeError, GlobeResult};

/// Symmetric cubic easing, the default transition curve of the original
/// d3-driven animation.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * u * u * u + 1.0
    }
}

/// Time-bounded interpolation between two rotations.
///
/// Angles interpolate elementwise and linearly (d3 array-interpolator
/// semantics), with cubic easing applied to normalized time. Sampling past
/// the duration clamps to the target, so a settled tween keeps reporting its
/// end state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTween {
    from: Rotation,
    to: Rotation,
    duration_ms: f64,
}

impl RotationTween {
    pub fn new(from: Rotation, to: Rotation, duration_ms: f64) -> GlobeResult<Self> {
        if !from.is_finite() || !to.is_finite() {
            return Err(GlobeError::InvalidData(
                "tween rotations must be finite".to_owned(),
            ));
        }
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(GlobeError::InvalidData(
                "tween duration must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            from,
            to,
            duration_ms,
        })
    }

    #[must_use]
    pub fn from_rotation(&self) -> Rotation {
        self.from
    }

    #[must_use]
    pub fn to_rotation(&self) -> Rotation {
        self.to
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Rotation at `elapsed_ms` since the tween started.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> Rotation {
        let t = ease_cubic_in_out(elapsed_ms / self.duration_ms);
        Rotation::new(
            self.from.lambda + (self.to.lambda - self.from.lambda) * t,
            self.from.phi + (self.to.phi - self.from.phi) * t,
            self.from.gamma + (self.to.gamma - self.from.gamma) * t,
        )
    }

    /// Whether the tween has reached its end state at `elapsed_ms`.
    #[must_use]
    pub fn is_settled(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_clamped_and_symmetric() {
        assert_eq!(ease_cubic_in_out(-1.0), 0.0);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        let a = ease_cubic_in_out(0.25);
        let b = ease_cubic_in_out(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tween_endpoints_match_from_and_to() {
        let tween = RotationTween::new(
            Rotation::default(),
            Rotation::new(115.01, -16.27, 0.0),
            1250.0,
        )
        .expect("tween");
        assert_eq!(tween.sample(0.0), Rotation::default());
        assert_eq!(tween.sample(1250.0), Rotation::new(115.01, -16.27, 0.0));
        assert_eq!(tween.sample(5000.0), Rotation::new(115.01, -16.27, 0.0));
        assert!(tween.is_settled(1250.0));
        assert!(!tween.is_settled(1249.9));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let err = RotationTween::new(Rotation::default(), Rotation::default(), 0.0);
        assert!(err.is_err());
    }
}
