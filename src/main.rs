//! Superposition entry point
//!
//! Runs a level headless with scripted input and logs what the compositor
//! would receive each frame.
//!
//! Usage: `superposition [settings.json] [frames] [seed]`

use std::process::ExitCode;

use superposition::demo::ScriptedInput;
use superposition::platform::Camera2d;
use superposition::renderer::{RenderFrame, RenderSink, UniformBatch, UniverseView};
use superposition::{MultiverseController, Settings};

/// Fixed frame time for headless runs (60 Hz)
const FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_SEED: u64 = 0x5eed;

/// Logs each universe handed to the renderer
struct LogSink {
    batch: UniformBatch,
}

impl RenderSink for LogSink {
    fn begin_frame(&mut self, frame: &RenderFrame<'_>) {
        self.batch.begin_frame(frame);
        log::trace!("frame {} t={:.3}s: {} universes", frame.frame, frame.time, frame.len());
    }

    fn draw_universe(&mut self, view: &UniverseView<'_>) {
        self.batch.draw_universe(view);
        let pattern: String = view
            .objects()
            .iter()
            .map(|o| if o.on_off { '1' } else { '0' })
            .collect();
        log::trace!(
            "  universe {} |{}> p=[{:.4}, {:.4}) hue={:.3}",
            view.index,
            pattern,
            view.min_val,
            view.max_val,
            view.hue
        );
    }
}

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, default: T) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Superposition (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match args.first() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let frames = parse_arg(args.get(1), DEFAULT_FRAMES);
    let seed = parse_arg(args.get(2), DEFAULT_SEED);

    let dt = settings.clamp_dt(FRAME_DT);
    let mut script = ScriptedInput::new(seed, Camera2d::with_size(settings.world_size));
    let mut level = MultiverseController::new(settings);
    let mut sink = LogSink {
        batch: UniformBatch::new(),
    };
    let mut peak = level.len();

    for _ in 0..frames {
        let hover_points: Vec<_> = level
            .universes()
            .iter()
            .flat_map(|u| u.objects.iter().map(|o| o.position))
            .collect();
        let input = script.next_frame(&hover_points);

        let frame = match level.step(dt, &input) {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("Simulation failed: {e}");
                return ExitCode::FAILURE;
            }
        };
        frame.submit(&mut sink);
        peak = peak.max(level.len());
    }

    log::info!(
        "Ran {} frames (seed {seed}): {} universes (peak {peak}), \
         total probability {:.12}, {} bytes of instance data last frame",
        level.frame,
        level.len(),
        level.total_probability(),
        sink.batch.instance_bytes().len()
    );
    ExitCode::SUCCESS
}
