mod report;
mod scenario;
mod simulation;

use report::render_summary;
use scenario::{build_board, default_config, default_readings};
use silofill::BoardConfig;
use simulation::replay;
use std::error::Error;

/// Simulated seconds replayed by the demonstration.
const REPLAY_SECONDS: f64 = 30.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // An optional JSON board configuration replaces the built-in catalogue.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading board configuration from {path}");
            BoardConfig::from_path(path)?
        }
        None => default_config(),
    };

    let mut board = build_board(&config)?;
    let readings = default_readings(&config);

    // Replay telemetry against the board with an uneven frame rate, then
    // print the final state of every silo.
    let summary = replay(&mut board, &config, &readings, REPLAY_SECONDS)?;
    println!("{}", render_summary(&summary));

    Ok(())
}
