//! Renders a circuit tour to a numbered PNG frame sequence.
//!
//! Usage: `render_tour_frames <world.topojson> <circuits.csv> <output-dir> [fps]`

use std::path::PathBuf;
use std::process::ExitCode;

use globe_rs::api::{GlobeConfig, GlobeEngine};
use globe_rs::core::Viewport;
use globe_rs::data::{WorldMap, parse_circuits_csv};
use globe_rs::error::GlobeResult;
use globe_rs::render::CairoRenderer;

const DEFAULT_FPS: f64 = 30.0;

fn main() -> ExitCode {
    globe_rs::telemetry::init_default_tracing();

    match run() {
        Ok(frames) => {
            println!("wrote {frames} frames");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("render_tour_frames: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> GlobeResult<usize> {
    let mut args = std::env::args().skip(1);
    let (world_path, circuits_path, output_dir) = match (args.next(), args.next(), args.next()) {
        (Some(world), Some(circuits), Some(output)) => {
            (PathBuf::from(world), PathBuf::from(circuits), PathBuf::from(output))
        }
        _ => {
            return Err(globe_rs::GlobeError::InvalidConfig(
                "usage: render_tour_frames <world.topojson> <circuits.csv> <output-dir> [fps]"
                    .to_owned(),
            ));
        }
    };
    let fps: f64 = args
        .next()
        .map(|raw| {
            raw.parse().map_err(|_| {
                globe_rs::GlobeError::InvalidConfig(format!("fps `{raw}` is not a number"))
            })
        })
        .transpose()?
        .unwrap_or(DEFAULT_FPS);
    if !fps.is_finite() || fps <= 0.0 {
        return Err(globe_rs::GlobeError::InvalidConfig(
            "fps must be finite and > 0".to_owned(),
        ));
    }

    let world_json = std::fs::read_to_string(&world_path).map_err(|err| {
        globe_rs::GlobeError::InvalidData(format!("failed to read {world_path:?}: {err}"))
    })?;
    let circuits_csv = std::fs::read_to_string(&circuits_path).map_err(|err| {
        globe_rs::GlobeError::InvalidData(format!("failed to read {circuits_path:?}: {err}"))
    })?;
    std::fs::create_dir_all(&output_dir).map_err(|err| {
        globe_rs::GlobeError::InvalidData(format!("failed to create {output_dir:?}: {err}"))
    })?;

    let world = WorldMap::from_topojson_str(&world_json)?;
    let circuits = parse_circuits_csv(&circuits_csv)?;

    let config = GlobeConfig::new(Viewport::new(600, 400));
    let viewport = config.viewport;
    let renderer = CairoRenderer::new(viewport.width as i32, viewport.height as i32)?;
    let mut engine = GlobeEngine::new(renderer, config, world, circuits)?;

    let frame_step_ms = 1000.0 / fps;
    let total_ms = engine.tour().total_duration_ms();
    let frame_count = (total_ms / frame_step_ms).ceil() as usize + 1;

    let mut last_status = String::new();
    for frame_index in 0..frame_count {
        let elapsed_ms = frame_index as f64 * frame_step_ms;
        engine.render_at(elapsed_ms)?;

        let status = engine.status_line(elapsed_ms);
        if status != last_status {
            println!("{status}");
            last_status = status;
        }

        let path = output_dir.join(format!("frame_{frame_index:05}.png"));
        engine.renderer().write_png(&path)?;
    }

    Ok(frame_count)
}
