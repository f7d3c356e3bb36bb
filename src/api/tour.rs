//! The tour plan: one highlight-and-rotate step per circuit.
//!
//! Steps are precomputed in a single ordered pass that pairs every circuit
//! with its predecessor, so sampling needs no shared mutable state: the plan
//! is an immutable schedule and `sample` is a pure function of elapsed time.

use tracing::debug;

use crate::api::config::GlobeConfig;
use crate::api::scene::Highlight;
use crate::core::tween::RotationTween;
use crate::core::types::{GeoPoint, Rotation};
use crate::data::circuits::Circuit;
use crate::error::GlobeResult;

/// One scheduled highlight step.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStep {
    pub index: usize,
    pub circuit: Circuit,
    /// Offset from the start of the tour at which this step fires.
    pub start_ms: f64,
    /// Rotation from the previous step's resting orientation to this one's.
    pub tween: RotationTween,
    /// Great-circle arc from the previous circuit, absent for the first step.
    pub arc: Option<(GeoPoint, GeoPoint)>,
}

/// Pure sampling result for one moment of the tour.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSample {
    pub rotation: Rotation,
    pub highlight: Option<Highlight>,
    /// `"Country: <country> | Circuit: <name>"`, empty before the first step.
    pub status: String,
    pub step_index: Option<usize>,
}

/// Immutable schedule over the ordered circuit list.
#[derive(Debug, Clone, PartialEq)]
pub struct TourPlan {
    steps: Vec<TourStep>,
    step_delay_ms: f64,
    tween_duration_ms: f64,
}

impl TourPlan {
    /// Builds the schedule: step `i` fires at `i * step_delay_ms`, rotates to
    /// face its circuit at the configured tilt, and carries the arc back to
    /// circuit `i - 1`.
    pub fn new(circuits: Vec<Circuit>, config: &GlobeConfig) -> GlobeResult<Self> {
        config.validate()?;

        let mut steps = Vec::with_capacity(circuits.len());
        let mut previous_rotation = Rotation::default();
        let mut previous_location: Option<GeoPoint> = None;

        for (index, circuit) in circuits.into_iter().enumerate() {
            let location = circuit.location();
            let target = Rotation::facing(location, config.tilt_deg);
            let tween =
                RotationTween::new(previous_rotation, target, config.tween_duration_ms)?;
            steps.push(TourStep {
                index,
                circuit,
                start_ms: index as f64 * config.step_delay_ms,
                tween,
                arc: previous_location.map(|from| (from, location)),
            });
            previous_rotation = target;
            previous_location = Some(location);
        }

        debug!(steps = steps.len(), "built tour plan");
        Ok(Self {
            steps,
            step_delay_ms: config.step_delay_ms,
            tween_duration_ms: config.tween_duration_ms,
        })
    }

    #[must_use]
    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time at which the last tween settles; zero for an empty tour.
    #[must_use]
    pub fn total_duration_ms(&self) -> f64 {
        match self.steps.last() {
            Some(step) => step.start_ms + self.tween_duration_ms,
            None => 0.0,
        }
    }

    /// State of the tour at `elapsed_ms` since the initial render.
    ///
    /// Before the first step fires this is the resting globe with no
    /// highlight; afterwards it is the active step's tweened rotation and
    /// highlight, held at the step's end state until the next step fires.
    #[must_use]
    pub fn sample(&self, elapsed_ms: f64) -> TourSample {
        let active = self
            .steps
            .iter()
            .rev()
            .find(|step| step.start_ms <= elapsed_ms);

        let Some(step) = active else {
            return TourSample {
                rotation: Rotation::default(),
                highlight: None,
                status: String::new(),
                step_index: None,
            };
        };

        let rotation = step.tween.sample(elapsed_ms - step.start_ms);
        TourSample {
            rotation,
            highlight: Some(Highlight {
                country: step.circuit.country.clone(),
                location: step.circuit.location(),
                label: step.circuit.name.clone(),
                arc: step.arc,
            }),
            status: format!(
                "Country: {} | Circuit: {}",
                step.circuit.country, step.circuit.name
            ),
            step_index: Some(step.index),
        }
    }

    #[must_use]
    pub fn step_delay_ms(&self) -> f64 {
        self.step_delay_ms
    }

    #[must_use]
    pub fn tween_duration_ms(&self) -> f64 {
        self.tween_duration_ms
    }
}
