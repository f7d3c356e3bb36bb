//! Pure scene construction: `(projection, world, highlight) -> RenderFrame`.
//!
//! Deciding what to draw is fully separated from when to draw it (the tour
//! plan) and how to rasterize it (the renderer backend).

use std::f64::consts::TAU;

use crate::api::config::GlobeStyle;
use crate::core::clip::{ClippedRing, clip_line_string, clip_ring, sample_great_circle};
use crate::core::projection::Orthographic;
use crate::core::types::{GeoPoint, Viewport};
use crate::data::names::normalize_country;
use crate::data::topology::{Country, WorldMap};
use crate::render::{
    MarkerPrimitive, PathPrimitive, PolylinePrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

/// Segments used to outline the sphere disk.
const SPHERE_SEGMENTS: usize = 96;

/// The transient highlight tuple for one frame: which country to color, where
/// the marker and label go, and the optional arc back to the previous stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    /// Raw country label from the circuit dataset; normalized at draw time.
    pub country: String,
    pub location: GeoPoint,
    pub label: String,
    pub arc: Option<(GeoPoint, GeoPoint)>,
}

/// Builds the full scene for one draw pass, in fixed occlusion order:
/// sphere, country fills, border mesh, arc, marker and label.
#[must_use]
pub fn build_scene_frame(
    projection: &Orthographic,
    world: &WorldMap,
    highlight: Option<&Highlight>,
    style: &GlobeStyle,
    viewport: Viewport,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);

    frame.paths.push(sphere_path(projection, style));

    let target = highlight.map(|h| normalize_country(&h.country));
    frame.paths.extend(country_paths(projection, &world.countries, target, style));

    for border in &world.borders {
        for segment in clip_line_string(projection, border) {
            frame.polylines.push(PolylinePrimitive::new(
                segment,
                style.border_width,
                style.border_color,
            ));
        }
    }

    if let Some(highlight) = highlight {
        if let Some((from, to)) = highlight.arc {
            let arc = sample_great_circle(from, to, style.arc_step_deg);
            for segment in clip_line_string(projection, &arc) {
                frame.polylines.push(PolylinePrimitive::new(
                    segment,
                    style.arc_width,
                    style.arc_color,
                ));
            }
        }

        let marker = projection.project(highlight.location);
        frame.markers.push(MarkerPrimitive::new(
            marker.x,
            marker.y,
            style.marker_radius,
            style.marker_color,
        ));
        if !highlight.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                highlight.label.clone(),
                marker.x + style.label_offset_x,
                marker.y + style.label_offset_y,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Left,
            ));
        }
    }

    frame
}

fn sphere_path(projection: &Orthographic, style: &GlobeStyle) -> PathPrimitive {
    let points = (0..SPHERE_SEGMENTS)
        .map(|i| projection.rim_point(TAU * i as f64 / SPHERE_SEGMENTS as f64))
        .collect();
    PathPrimitive::filled(points, style.sphere_fill)
        .with_stroke(style.rim_color, style.rim_width)
}

fn country_fill_paths(
    projection: &Orthographic,
    country: &Country,
    target: Option<&str>,
    style: &GlobeStyle,
) -> Vec<PathPrimitive> {
    let fill = if target == Some(country.name.as_str()) && !country.name.is_empty() {
        style.highlight_fill
    } else {
        style.country_fill
    };

    let mut paths = Vec::new();
    for polygon in &country.polygons {
        for ring in &polygon.rings {
            match clip_ring(projection, ring) {
                ClippedRing::Visible(points) if points.len() >= 3 => {
                    paths.push(PathPrimitive::filled(points, fill));
                }
                _ => {}
            }
        }
    }
    paths
}

#[cfg(not(feature = "parallel-projection"))]
fn country_paths(
    projection: &Orthographic,
    countries: &[Country],
    target: Option<&str>,
    style: &GlobeStyle,
) -> Vec<PathPrimitive> {
    countries
        .iter()
        .flat_map(|country| country_fill_paths(projection, country, target, style))
        .collect()
}

#[cfg(feature = "parallel-projection")]
fn country_paths(
    projection: &Orthographic,
    countries: &[Country],
    target: Option<&str>,
    style: &GlobeStyle,
) -> Vec<PathPrimitive> {
    countries
        .par_iter()
        .map(|country| country_fill_paths(projection, country, target, style))
        .reduce(Vec::new, |mut acc, mut paths| {
            acc.append(&mut paths);
            acc
        })
}
