pub mod clip;
pub mod projection;
pub mod tween;
pub mod types;

pub use clip::{ClippedRing, clip_line_string, clip_ring, sample_great_circle};
pub use projection::{Orthographic, ProjectedPoint};
pub use tween::{RotationTween, ease_cubic_in_out};
pub use types::{GeoPoint, Rotation, Viewport};
