mod config;
mod engine;
mod scene;
mod tour;

pub use config::{GlobeConfig, GlobeStyle};
pub use engine::GlobeEngine;
pub use scene::{Highlight, build_scene_frame};
pub use tour::{TourPlan, TourSample, TourStep};
