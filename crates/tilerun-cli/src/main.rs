//! Headless host for the tilerun engine.
//!
//! Loads a level (or the built-in demo) and an optional physics config,
//! replays a scripted input timeline through the fixed-timestep runner and
//! prints the per-frame body position and camera center.
//!
//! ```sh
//! tilerun --script "60:-,120:R,1:RJ,60:R" --every 10
//! RUST_LOG=debug tilerun --level level.json --json
//! ```

mod runner;
mod script;

use std::path::{Path, PathBuf};

use clap::Parser;
use tilerun_engine::{FrameOutput, Level, PhysicsConfig, Simulation, DEFAULT_CELL_SIZE};

use crate::runner::Runner;
use crate::script::InputScript;

/// Replay scripted input against a tile level and print what the body and
/// camera do.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Level JSON file. Uses the built-in demo level when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Physics config JSON file. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Input timeline, e.g. "60:-,120:R,1:RJ,40:L".
    #[arg(long, default_value = "120:-,120:R,1:RJ,60:R,60:L")]
    script: String,

    /// Host frame time in seconds. Defaults to the config's fixed timestep.
    #[arg(long)]
    frame_dt: Option<f32>,

    /// Print every Nth simulated frame (frames with events are always printed).
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Emit one JSON object per line instead of text.
    #[arg(long)]
    json: bool,
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn load_config(path: Option<&Path>) -> Result<PhysicsConfig, String> {
    match path {
        Some(path) => PhysicsConfig::from_json(&read_file(path)?)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e)),
        None => Ok(PhysicsConfig::default()),
    }
}

fn load_level(path: Option<&Path>) -> Result<Level, String> {
    match path {
        Some(path) => Level::from_json(&read_file(path)?)
            .map_err(|e| format!("Invalid level {}: {}", path.display(), e)),
        None => {
            log::info!("no level given, using the demo level");
            Ok(Level::demo(DEFAULT_CELL_SIZE))
        }
    }
}

/// Reject configs the runner cannot pace and bodies that do not fit at spawn.
fn build_simulation(config: PhysicsConfig, level: Level) -> Result<Simulation, String> {
    if !(config.fixed_dt.is_finite() && config.fixed_dt > 0.0) {
        return Err(format!("fixed_dt must be positive, got {}", config.fixed_dt));
    }
    level
        .check_spawn(config.body_half_extent(level.grid.cell_size()))
        .map_err(|e| format!("Invalid level: {}", e))?;
    Ok(Simulation::new(config, level))
}

fn print_frame(out: &FrameOutput, json: bool) {
    if json {
        let events: Vec<String> = out.events.iter().map(|e| format!("{:?}", e)).collect();
        let line = serde_json::json!({
            "frame": out.frame,
            "position": [out.position.x, out.position.y],
            "velocity": [out.velocity.x, out.velocity.y],
            "grounded": out.grounded,
            "camera": [out.camera_center.x, out.camera_center.y],
            "events": events,
        });
        println!("{}", line);
    } else {
        println!(
            "{:>6}  pos=({:8.2}, {:8.2})  vel=({:6.2}, {:6.2})  {}  cam=({:7.1}, {:7.1})  {:?}",
            out.frame,
            out.position.x,
            out.position.y,
            out.velocity.x,
            out.velocity.y,
            if out.grounded { "G" } else { "-" },
            out.camera_center.x,
            out.camera_center.y,
            out.events
        );
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())?;
    let level = load_level(cli.level.as_deref())?;
    let script = InputScript::parse(&cli.script)?;
    let frame_dt = cli.frame_dt.unwrap_or(config.fixed_dt);
    if frame_dt.is_nan() || frame_dt <= 0.0 {
        return Err(format!("--frame-dt must be positive, got {}", frame_dt));
    }
    let every = cli.every.max(1);

    let mut runner = Runner::new(build_simulation(config, level)?);
    log::info!(
        "replaying {} host frames at {:.4}s each",
        script.total_frames(),
        frame_dt
    );

    for events in script.frame_events() {
        for event in events {
            runner.push_input(event);
        }
        for out in runner.tick(frame_dt) {
            if out.frame % every == 0 || !out.events.is_empty() {
                print_frame(&out, cli.json);
            }
        }
    }

    let body = runner.simulation().body();
    log::info!(
        "done after {} frames: body at ({:.2}, {:.2}), grounded={}",
        runner.simulation().frame(),
        body.position.x,
        body.position.y,
        body.grounded
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
