//! Pond Engine headless driver.
//!
//! Runs the demo scenes from [`game`] without a window: input comes from a
//! scripted key pattern and drawing goes to a [`RecordingCanvas`] that is
//! only counted. Useful for smoke-testing tunables from `config.ini`.
//!
//! # Main Loop
//!
//! 1. Load [`GameConfig`] (missing file means defaults)
//! 2. Register the demo scenes and switch to the requested one
//! 3. For every tick: poll input, tick the active scene
//! 4. Once per simulated second, log a summary line
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scene bounce --ticks 1200
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use pondengine::game;
use pondengine::render::RecordingCanvas;
use pondengine::resources::gameconfig::GameConfig;
use pondengine::resources::input::{HeldKeys, InputState, Key};
use pondengine::scene::SceneManager;

/// Pond Engine 2D (headless)
#[derive(Parser)]
#[command(version, about = "Runs the Pond Engine demo scenes without a window.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Scene to start in.
    #[arg(long, default_value = game::POND)]
    scene: String,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Seconds per tick. Defaults to 1 / target_fps.
    #[arg(long)]
    dt: Option<f32>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

/// Keys held at `frame`: a slow loop right, up, left, down.
fn scripted_keys(frame: u64, fps: u64) -> HeldKeys {
    let keys = match (frame / (fps * 2)) % 4 {
        0 => vec![Key::Right],
        1 => vec![Key::Right, Key::Up],
        2 => vec![Key::Left],
        _ => vec![Key::Down],
    };
    HeldKeys(keys)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Hello, world! This is the Pond Engine!");

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        error!("{e}");
        std::process::exit(1);
    }

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let fps = u64::from(config.target_fps);
    let dt = cli.dt.unwrap_or(1.0 / config.target_fps as f32);
    if !dt.is_finite() || dt <= 0.0 {
        error!("--dt must be a positive number of seconds, got {dt}");
        std::process::exit(1);
    }

    let mut manager = SceneManager::new(config);
    game::register_scenes(&mut manager);
    info!("Available scenes: {}", manager.scene_names().join(", "));

    if let Err(e) = manager.switch_to(&cli.scene) {
        error!("Could not start scene '{}': {}", cli.scene, e);
        std::process::exit(1);
    }

    let mut input = InputState::default();
    let mut canvas = RecordingCanvas::default();
    let mut draw_calls = 0usize;

    for frame in 0..cli.ticks {
        input.poll(&scripted_keys(frame, fps));
        canvas.clear();
        if !manager.tick(dt, &input, &mut canvas) {
            break;
        }
        draw_calls += canvas.commands.len();

        if (frame + 1) % fps == 0 {
            let Some(scene) = manager.active() else {
                break;
            };
            let focus = if scene.lookup(game::PLAYER).is_some() {
                game::PLAYER
            } else {
                game::BALL
            };
            let pos = scene.position(focus).unwrap_or_default();
            let vel = scene.velocity(focus).unwrap_or_default();
            info!(
                "t={:>5.1}s {} pos=({:.1}, {:.1}) vel=({:.1}, {:.1}) contact={} collisions={} draws/s={}",
                (frame + 1) as f32 * dt,
                focus,
                pos.x,
                pos.y,
                vel.x,
                vel.y,
                scene.is_contact(focus).unwrap_or(false),
                scene.collisions().map(|c| c.len()).unwrap_or(0),
                draw_calls
            );
            draw_calls = 0;
        }
    }

    manager.dispose();
    info!("Bye!");
}
