//! Terminal driver for the fleet replay.
//!
//! Loads the configured trip files, then plays them back against the virtual clock and
//! prints the derived fleet state after every tick.

mod app;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use replay_core::config::ReplayConfig;
use replay_core::error::ReplayError;
use replay_core::loader::load_all_trips;

use crate::app::{parse_scheduled_control, ReplayApp, ScheduledControl};
use crate::render::{render_json, render_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "replay_cli", about = "Replay fleet telemetry event logs")]
struct Cli {
    /// JSON config file; defaults apply to anything it omits.
    #[arg(long, env = "FLEET_REPLAY_CONFIG")]
    config: Option<PathBuf>,
    /// Directory holding the trip event files.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Initial speed multiplier.
    #[arg(long)]
    speed: Option<f64>,
    /// Real time between ticks.
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Number of tick slots to play before exiting.
    #[arg(long, default_value_t = 60)]
    ticks: usize,
    /// Run ticks back to back instead of waiting for wall time.
    #[arg(long)]
    no_sleep: bool,
    /// Print a frame every N slots.
    #[arg(long, default_value_t = 1)]
    every: usize,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Scripted controls, e.g. `5:speed=50,10:toggle,12:toggle,20:reset`.
    #[arg(long, value_delimiter = ',', value_parser = parse_scheduled_control)]
    controls: Vec<ScheduledControl>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ReplayConfig, ReplayError> {
        let mut config = match &self.config {
            Some(path) => ReplayConfig::load(path)?,
            None => ReplayConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir.clone());
        }
        if let Some(speed) = self.speed {
            config = config.with_initial_speed(speed);
        }
        if let Some(interval_ms) = self.interval_ms {
            config = config.with_tick_interval_ms(interval_ms);
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_frame(app: &mut ReplayApp, format: OutputFormat) {
    let frame = app.frame();
    match format {
        OutputFormat::Text => println!("{}", render_text(&frame)),
        OutputFormat::Json => match render_json(&frame) {
            Ok(line) => println!("{line}"),
            Err(err) => error!(%err, "failed to encode frame"),
        },
    }
}

fn run(cli: &Cli) -> Result<(), ReplayError> {
    let config = cli.resolve_config()?;
    let trips = load_all_trips(&config.data_dir, &config.trip_files)?;
    let mut app = ReplayApp::new(trips, &config)?;
    info!(
        trips = config.trip_files.len(),
        speed = config.initial_speed,
        interval_ms = config.tick_interval_ms,
        "replay started"
    );
    print_frame(&mut app, cli.format);

    let every = cli.every.max(1);
    if !cli.no_sleep {
        app.advance_by_wall_clock();
    }
    for slot in 1..=cli.ticks {
        for scheduled in cli.controls.iter().filter(|c| c.slot == slot) {
            info!(slot, control = ?scheduled.control, "applying control");
            app.control(scheduled.control)?;
        }
        if cli.no_sleep {
            app.tick();
        } else {
            thread::sleep(app.interval());
            app.advance_by_wall_clock();
        }
        if slot % every == 0 {
            print_frame(&mut app, cli.format);
        }
    }
    info!(ticks = app.ticks_executed, "replay finished");
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
