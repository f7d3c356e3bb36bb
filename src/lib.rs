//! globe-rs: animated orthographic globe rendering.
//!
//! This crate renders a rotating globe and drives a timed "tour" over an
//! ordered list of circuit locations, highlighting one country at a time and
//! drawing great-circle arcs between consecutive stops. Projection,
//! hemisphere clipping and topology decoding are implemented natively; the
//! drawing backend is pluggable through [`render::Renderer`].

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{GlobeConfig, GlobeEngine};
pub use error::{GlobeError, GlobeResult};
