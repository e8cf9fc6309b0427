use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cursor_gravity::headless::{render_headless, HeadlessRun};
use cursor_gravity::window::run_windowed;
use cursor_gravity::{GravityConfig, RunError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Cursor-reactive particle background.
///
/// Hold the left mouse button or Space to vacuum particles toward the
/// cursor; let go to splash them.
#[derive(Parser, Debug)]
#[command(name = "cursor-gravity", version, about)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the particle count.
    #[arg(long)]
    particles: Option<usize>,

    /// Seed for a reproducible layout.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Render this many frames without a window and write a PNG.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u32>,

    /// Where the headless run writes its last frame.
    #[arg(long, default_value = "snapshot.png")]
    snapshot: PathBuf,

    /// First headless frame with the vacuum held.
    #[arg(long, value_name = "FRAME", requires = "vacuum_until")]
    vacuum_from: Option<u32>,

    /// Headless frame at which the vacuum is released.
    #[arg(long, value_name = "FRAME", requires = "vacuum_from")]
    vacuum_until: Option<u32>,
}

fn run(cli: Cli) -> Result<(), RunError> {
    let mut config = match &cli.config {
        Some(path) => GravityConfig::load(path)?,
        None => GravityConfig::default(),
    };
    if let Some(count) = cli.particles {
        config.particle_count = count;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match cli.headless {
        Some(frames) => {
            let mut run = HeadlessRun::new(frames, cli.width, cli.height);
            if let (Some(from), Some(until)) = (cli.vacuum_from, cli.vacuum_until) {
                run.vacuum = Some(from..until);
            }
            let canvas = render_headless(config, &run)?;
            canvas.save(&cli.snapshot)?;
            info!(path = %cli.snapshot.display(), "snapshot written");
            Ok(())
        }
        None => run_windowed(config, cli.width, cli.height),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
