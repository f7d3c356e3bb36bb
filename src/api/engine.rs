use tracing::debug;

use crate::api::config::{GlobeConfig, GlobeStyle};
use crate::api::scene::build_scene_frame;
use crate::api::tour::{TourPlan, TourSample};
use crate::core::projection::Orthographic;
use crate::data::circuits::Circuit;
use crate::data::topology::WorldMap;
use crate::error::GlobeResult;
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `GlobeEngine` owns the world geometry, the tour schedule, the projection
/// and the renderer. The host drives it frame by frame with an elapsed time;
/// the engine stays free of any event loop or timer of its own.
pub struct GlobeEngine<R: Renderer> {
    renderer: R,
    config: GlobeConfig,
    style: GlobeStyle,
    world: WorldMap,
    plan: TourPlan,
    projection: Orthographic,
}

impl<R: Renderer> GlobeEngine<R> {
    pub fn new(
        renderer: R,
        config: GlobeConfig,
        world: WorldMap,
        circuits: Vec<Circuit>,
    ) -> GlobeResult<Self> {
        config.validate()?;
        let projection = Orthographic::fit_extent(config.viewport, config.margin_px)?;
        let plan = TourPlan::new(circuits, &config)?;
        debug!(
            countries = world.countries.len(),
            steps = plan.steps().len(),
            "globe engine initialized"
        );
        Ok(Self {
            renderer,
            config,
            style: GlobeStyle::default(),
            world,
            plan,
            projection,
        })
    }

    #[must_use]
    pub fn config(&self) -> GlobeConfig {
        self.config
    }

    #[must_use]
    pub fn style(&self) -> GlobeStyle {
        self.style
    }

    pub fn set_style(&mut self, style: GlobeStyle) -> GlobeResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    #[must_use]
    pub fn tour(&self) -> &TourPlan {
        &self.plan
    }

    #[must_use]
    pub fn world(&self) -> &WorldMap {
        &self.world
    }

    /// Tour state at `elapsed_ms`, without touching the projection.
    #[must_use]
    pub fn sample_at(&self, elapsed_ms: f64) -> TourSample {
        self.plan.sample(elapsed_ms)
    }

    /// Status text for `elapsed_ms`:
    /// `"Country: <country> | Circuit: <name>"`, empty before the first step.
    #[must_use]
    pub fn status_line(&self, elapsed_ms: f64) -> String {
        self.plan.sample(elapsed_ms).status
    }

    /// Materializes the scene for `elapsed_ms` without rendering it.
    pub fn frame_at(&mut self, elapsed_ms: f64) -> GlobeResult<RenderFrame> {
        let sample = self.plan.sample(elapsed_ms);
        self.projection.set_rotation(sample.rotation)?;
        Ok(build_scene_frame(
            &self.projection,
            &self.world,
            sample.highlight.as_ref(),
            &self.style,
            self.config.viewport,
        ))
    }

    /// Builds and renders the scene for `elapsed_ms`.
    pub fn render_at(&mut self, elapsed_ms: f64) -> GlobeResult<()> {
        let frame = self.frame_at(elapsed_ms)?;
        self.renderer.render(&frame)
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by host draw callbacks while keeping the renderer
    /// implementation decoupled from any windowing toolkit.
    #[cfg(feature = "cairo-backend")]
    pub fn render_at_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        elapsed_ms: f64,
    ) -> GlobeResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.frame_at(elapsed_ms)?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
