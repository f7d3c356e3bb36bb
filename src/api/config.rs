use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{GlobeError, GlobeResult};
use crate::render::Color;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load globe
/// setup without inventing their own ad-hoc format. Palette and stroke
/// styling lives in [`GlobeStyle`], set on the engine separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobeConfig {
    pub viewport: Viewport,
    /// Inset between the sphere and the viewport edge, px.
    #[serde(default = "default_margin_px")]
    pub margin_px: f64,
    /// Northward tilt applied to every tour rotation target, degrees.
    #[serde(default = "default_tilt_deg")]
    pub tilt_deg: f64,
    /// Wall-clock spacing between consecutive highlight steps.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: f64,
    /// Duration of each rotation tween.
    #[serde(default = "default_tween_duration_ms")]
    pub tween_duration_ms: f64,
}

impl GlobeConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin_px: default_margin_px(),
            tilt_deg: default_tilt_deg(),
            step_delay_ms: default_step_delay_ms(),
            tween_duration_ms: default_tween_duration_ms(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, step_delay_ms: f64, tween_duration_ms: f64) -> Self {
        self.step_delay_ms = step_delay_ms;
        self.tween_duration_ms = tween_duration_ms;
        self
    }

    #[must_use]
    pub fn with_tilt(mut self, tilt_deg: f64) -> Self {
        self.tilt_deg = tilt_deg;
        self
    }

    pub fn validate(&self) -> GlobeResult<()> {
        if !self.viewport.is_valid() {
            return Err(GlobeError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.margin_px.is_finite() || self.margin_px < 0.0 {
            return Err(GlobeError::InvalidConfig(
                "margin_px must be finite and >= 0".to_owned(),
            ));
        }
        if !self.tilt_deg.is_finite() {
            return Err(GlobeError::InvalidConfig(
                "tilt_deg must be finite".to_owned(),
            ));
        }
        for (name, value) in [
            ("step_delay_ms", self.step_delay_ms),
            ("tween_duration_ms", self.tween_duration_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GlobeError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        // A tween outliving the step delay would let two steps fight over the
        // projection rotation.
        if self.step_delay_ms < self.tween_duration_ms {
            return Err(GlobeError::InvalidConfig(format!(
                "step_delay_ms ({}) must be >= tween_duration_ms ({})",
                self.step_delay_ms, self.tween_duration_ms
            )));
        }
        Ok(())
    }
}

fn default_margin_px() -> f64 {
    10.0
}

fn default_tilt_deg() -> f64 {
    20.0
}

fn default_step_delay_ms() -> f64 {
    2000.0
}

fn default_tween_duration_ms() -> f64 {
    1250.0
}

/// Palette and stroke styling for the scene builder.
///
/// Defaults follow the original visualization: black sphere with a white rim,
/// muted gray countries, red highlight and marker, white borders and label,
/// lighter gray arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeStyle {
    pub sphere_fill: Color,
    pub rim_color: Color,
    pub rim_width: f64,
    pub country_fill: Color,
    pub highlight_fill: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub arc_color: Color,
    pub arc_width: f64,
    /// Sampling step along great-circle arcs, degrees.
    pub arc_step_deg: f64,
    pub marker_color: Color,
    pub marker_radius: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub label_offset_x: f64,
    pub label_offset_y: f64,
}

impl Default for GlobeStyle {
    fn default() -> Self {
        Self {
            sphere_fill: Color::rgb(0.0, 0.0, 0.0),
            rim_color: Color::rgb(1.0, 1.0, 1.0),
            rim_width: 2.0,
            country_fill: Color::rgb(0.267, 0.267, 0.267),
            highlight_fill: Color::rgb(1.0, 0.0, 0.0),
            border_color: Color::rgb(1.0, 1.0, 1.0),
            border_width: 0.5,
            arc_color: Color::rgb(0.733, 0.733, 0.733),
            arc_width: 2.0,
            arc_step_deg: 2.0,
            marker_color: Color::rgb(1.0, 0.0, 0.0),
            marker_radius: 5.0,
            label_color: Color::rgb(1.0, 1.0, 1.0),
            label_font_size_px: 14.0,
            label_offset_x: 7.0,
            label_offset_y: -7.0,
        }
    }
}

impl GlobeStyle {
    pub fn validate(&self) -> GlobeResult<()> {
        for color in [
            self.sphere_fill,
            self.rim_color,
            self.country_fill,
            self.highlight_fill,
            self.border_color,
            self.arc_color,
            self.marker_color,
            self.label_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("rim_width", self.rim_width),
            ("border_width", self.border_width),
            ("arc_width", self.arc_width),
            ("arc_step_deg", self.arc_step_deg),
            ("marker_radius", self.marker_radius),
            ("label_font_size_px", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GlobeError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.label_offset_x.is_finite() || !self.label_offset_y.is_finite() {
            return Err(GlobeError::InvalidConfig(
                "label offsets must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
