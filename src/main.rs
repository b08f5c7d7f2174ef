//! Stretchy Disk headless driver
//!
//! Runs a seeded, scripted drag through the fixed-timestep loop and logs how
//! the disk deforms and settles. Usage: `stretchy-disk [config.json] [seed]`.

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use stretchy_disk::consts::*;
use stretchy_disk::render::{FrameRecorder, pack_vertices, submit_frame, vertex_bytes};
use stretchy_disk::sim::{FrameInput, PointerPhase, PointerSample, Surface, ViewTransform, tick};
use stretchy_disk::{ConfigError, SurfaceConfig, polar_to_cartesian};

const SCREEN: Vec2 = Vec2::new(800.0, 600.0);
const PIXELS_PER_UNIT: f32 = 120.0;

/// Scripted pointer: press near the rim, drag out, release, then let go
struct DragScript {
    frames: Vec<Option<PointerSample>>,
}

impl DragScript {
    fn generate(rng: &mut Pcg32, view: &ViewTransform, radius: f32) -> Self {
        let world_to_screen = view.screen_to_world.inverse();
        let to_screen = |world: Vec2| world_to_screen.transform_point2(world);

        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let reach = rng.random_range(1.3..2.2) * radius;
        let drag_frames = rng.random_range(20..60);

        let mut frames = vec![None; 10];
        let start = polar_to_cartesian(radius * 0.8, angle);
        frames.push(Some(PointerSample::new(PointerPhase::Began, to_screen(start))));
        let mut last = start;
        for i in 1..=drag_frames {
            let t = i as f32 / drag_frames as f32;
            let jitter = Vec2::new(rng.random_range(-0.02..0.02), rng.random_range(-0.02..0.02));
            last = polar_to_cartesian(radius * 0.8 + (reach - radius * 0.8) * t, angle) + jitter;
            frames.push(Some(PointerSample::new(PointerPhase::Moved, to_screen(last))));
        }
        frames.push(Some(PointerSample::new(PointerPhase::Ended, to_screen(last))));
        frames.extend(std::iter::repeat_n(None, 240));
        Self { frames }
    }
}

/// Final statistics printed as JSON
#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    vertices: usize,
    triangles: usize,
    frames: u64,
    peak_energy: f32,
    final_energy: f32,
    rotation: f32,
    translation: Vec2,
    vertex_buffer_bytes: usize,
}

fn load_config(path: Option<&str>) -> Result<SurfaceConfig, ConfigError> {
    match path {
        Some(path) => SurfaceConfig::load(Path::new(path)),
        None => Ok(SurfaceConfig::default()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Stretchy Disk (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(12345u64);

    let radius = config.radius;
    let mut surface = Surface::new(config);
    let view = ViewTransform::orthographic(SCREEN, Vec2::ZERO, PIXELS_PER_UNIT);
    let mut rng = Pcg32::seed_from_u64(seed);
    let script = DragScript::generate(&mut rng, &view, radius);
    let mut recorder = FrameRecorder::default();

    // Feed the script at 60 Hz through the fixed-step accumulator
    let frame_dt = 1.0 / 60.0;
    let mut accumulator = 0.0;
    let mut peak_energy: f32 = 0.0;
    for (frame, pointer) in script.frames.iter().enumerate() {
        accumulator += frame_dt;
        let mut substeps = 0;
        let mut pending = *pointer;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // A pointer event is consumed once; later substeps see it as held
            let input = FrameInput::new(pending, view, radius);
            tick(&mut surface, &input, SIM_DT);
            pending = pending.and_then(|p| match p.phase {
                PointerPhase::Began | PointerPhase::Moved => {
                    Some(PointerSample::new(PointerPhase::Moved, p.screen))
                }
                PointerPhase::Ended | PointerPhase::Cancelled => None,
            });
            accumulator -= SIM_DT;
            substeps += 1;
        }

        submit_frame(&surface, &mut recorder);
        let energy = surface.displacement_energy();
        peak_energy = peak_energy.max(energy);
        if frame % 30 == 0 {
            log::info!(
                "frame {:4}: energy {:.6}, selected {:3}, rotation {:+.3}, translation {}",
                frame,
                energy,
                surface.selection().len(),
                surface.rotation(),
                surface.translation()
            );
        }
    }

    let vertices = pack_vertices(&surface);
    let summary = Summary {
        seed,
        vertices: recorder.positions.len(),
        triangles: recorder.triangles.len() / 3,
        frames: surface.frame,
        peak_energy,
        final_energy: surface.displacement_energy(),
        rotation: surface.rotation(),
        translation: surface.translation(),
        vertex_buffer_bytes: vertex_bytes(&vertices).len(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize summary: {err}"),
    }
}
