use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{GlobeError, GlobeResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub paths_drawn: usize,
    pub polylines_drawn: usize,
    pub markers_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external
/// Cairo context (for example a host application's draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GlobeResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> GlobeResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GlobeError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> GlobeResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface content as PNG.
    pub fn write_png(&self, path: &std::path::Path) -> GlobeResult<()> {
        let mut file = std::fs::File::create(path)
            .map_err(|err| GlobeError::InvalidData(format!("failed to create {path:?}: {err}")))?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| GlobeError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> GlobeResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for path in &frame.paths {
            let mut points = path.points.iter();
            if let Some((x, y)) = points.next() {
                context.move_to(*x, *y);
            }
            for (x, y) in points {
                context.line_to(*x, *y);
            }
            context.close_path();
            apply_color(context, path.fill_color);
            if path.stroke_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill path", err))?;
                apply_color(context, path.stroke_color);
                context.set_line_width(path.stroke_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke path outline", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill path", err))?;
            }
            stats.paths_drawn += 1;
        }

        for polyline in &frame.polylines {
            let mut points = polyline.points.iter();
            if let Some((x, y)) = points.next() {
                context.move_to(*x, *y);
            }
            for (x, y) in points {
                context.line_to(*x, *y);
            }
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for marker in &frame.markers {
            context.new_sub_path();
            context.arc(marker.x, marker.y, marker.radius, 0.0, TAU);
            apply_color(context, marker.color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill marker", err))?;
            stats.markers_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans Bold {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GlobeResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> GlobeResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GlobeError {
    GlobeError::InvalidData(format!("{prefix}: {err}"))
}
