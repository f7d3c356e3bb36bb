use crate::error::{GlobeError, GlobeResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> GlobeResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GlobeError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Draw command for one closed, filled area in pixel space.
///
/// The outline is closed implicitly; `stroke_width` of zero means fill only.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub points: Vec<(f64, f64)>,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl PathPrimitive {
    #[must_use]
    pub fn filled(points: Vec<(f64, f64)>, fill_color: Color) -> Self {
        Self {
            points,
            fill_color,
            stroke_color: fill_color,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke_color: Color, stroke_width: f64) -> Self {
        self.stroke_color = stroke_color;
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(&self) -> GlobeResult<()> {
        if self.points.len() < 3 {
            return Err(GlobeError::InvalidData(
                "path needs at least 3 points".to_owned(),
            ));
        }
        for (x, y) in &self.points {
            if !x.is_finite() || !y.is_finite() {
                return Err(GlobeError::InvalidData(
                    "path coordinates must be finite".to_owned(),
                ));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(GlobeError::InvalidData(
                "path stroke width must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Draw command for one open stroked path in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> GlobeResult<()> {
        if self.points.len() < 2 {
            return Err(GlobeError::InvalidData(
                "polyline needs at least 2 points".to_owned(),
            ));
        }
        for (x, y) in &self.points {
            if !x.is_finite() || !y.is_finite() {
                return Err(GlobeError::InvalidData(
                    "polyline coordinates must be finite".to_owned(),
                ));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GlobeError::InvalidData(
                "polyline stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one filled dot in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPrimitive {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

impl MarkerPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64, color: Color) -> Self {
        Self {
            x,
            y,
            radius,
            color,
        }
    }

    pub fn validate(self) -> GlobeResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GlobeError::InvalidData(
                "marker coordinates must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GlobeError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> GlobeResult<()> {
        if self.text.is_empty() {
            return Err(GlobeError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GlobeError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GlobeError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
