use crate::error::GlobeResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_path_count: usize,
    pub last_polyline_count: usize,
    pub last_marker_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GlobeResult<()> {
        frame.validate()?;
        self.last_path_count = frame.paths.len();
        self.last_polyline_count = frame.polylines.len();
        self.last_marker_count = frame.markers.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
