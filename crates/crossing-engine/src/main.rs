//! Frame loop binary for the four-way crossing simulation.
//!
//! Wires together configuration, logging, the simulation state, operator
//! controls and the renderer stream, then runs the frame loop until a
//! termination condition is met.
//!
//! Frames go to stdout as JSON lines; logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `crossing-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation state (signals, actors, scene tracking)
//! 4. Create operator state from engine bounds
//! 5. Start the keyboard reader
//! 6. Run the frame loop
//! 7. Log the result

mod error;
mod json_sink;
mod keyboard;

use std::path::Path;
use std::sync::Arc;

use crossing_core::clock::MonotonicClock;
use crossing_core::config::CrossingConfig;
use crossing_core::operator::OperatorState;
use crossing_core::runner;
use crossing_core::tick::SimulationState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::json_sink::JsonLinesSink;

/// Config file looked up in the working directory.
const CONFIG_PATH: &str = "crossing-config.yaml";

/// Application entry point for the crossing engine.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the frame stream fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("crossing-engine starting");
    info!(
        a_green_ms = config.signals.a_green_ms,
        a_amber_ms = config.signals.a_amber_ms,
        b_green_ms = config.signals.b_green_ms,
        b_amber_ms = config.signals.b_amber_ms,
        vehicles_per_axis = config.traffic.vehicles_per_axis,
        map_swap = config.display.map_swap,
        "Configuration loaded"
    );

    // 3. Build the simulation state.
    let mut state = SimulationState::from_config(&config)?;
    info!(
        actors = state.actors.len(),
        cycle_ms = state.phase.cycle_period_ms(),
        "Simulation state initialized"
    );

    // 4. Create operator state.
    let operator = Arc::new(OperatorState::new(
        &config.engine,
        config.display.start_at_night,
    ));
    info!(
        max_frames = operator.max_frames(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        frame_interval_ms = operator.frame_interval_ms(),
        night = operator.is_night(),
        "Operator state initialized"
    );

    // 5. Start the keyboard reader. The thread is detached so a pending
    //    read does not keep the process alive after the run ends.
    {
        let operator = Arc::clone(&operator);
        std::thread::spawn(move || {
            keyboard::read_commands(std::io::stdin().lock(), &operator);
        });
    }
    info!("Keyboard controls: n = day/night, p = pause/resume, q = quit");

    // 6. Run the frame loop.
    let mut clock = MonotonicClock::start();
    let mut sink = JsonLinesSink::new(std::io::stdout());
    let result = runner::run_simulation(&mut state, &mut clock, &operator, &mut sink).await?;

    // 7. Log the result.
    runner::log_simulation_end(&result);
    info!(frames_written = sink.written(), "crossing-engine finished");

    Ok(())
}

/// Load configuration from `crossing-config.yaml`, or defaults if the file
/// does not exist.
fn load_config() -> Result<CrossingConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(CrossingConfig::from_file(config_path)?)
    } else {
        Ok(CrossingConfig::parse("")?)
    }
}
