mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, MarkerPrimitive, PathPrimitive, PolylinePrimitive, TextHAlign, TextPrimitive,
};

use crate::error::GlobeResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from projection and animation logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GlobeResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
