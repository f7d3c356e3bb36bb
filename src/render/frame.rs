use crate::core::Viewport;
use crate::error::{GlobeError, GlobeResult};
use crate::render::{MarkerPrimitive, PathPrimitive, PolylinePrimitive, TextPrimitive};

/// Backend-agnostic scene for one globe draw pass.
///
/// Draw order is vector order within each kind, and kinds draw in struct
/// order: paths, polylines, markers, texts. Later draws occlude earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub paths: Vec<PathPrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            paths: Vec::new(),
            polylines: Vec::new(),
            markers: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerPrimitive) -> Self {
        self.markers.push(marker);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> GlobeResult<()> {
        if !self.viewport.is_valid() {
            return Err(GlobeError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for path in &self.paths {
            path.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
            && self.polylines.is_empty()
            && self.markers.is_empty()
            && self.texts.is_empty()
    }
}
