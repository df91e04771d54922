//! Keyboard controls read from stdin.
//!
//! Each input line is scanned character by character:
//!
//! | Key | Effect                  |
//! |-----|-------------------------|
//! | `n` | toggle day/night        |
//! | `p` | pause or resume         |
//! | `q` | stop the run            |
//!
//! Other characters are ignored. The reader only flips flags on the shared
//! [`OperatorState`]; the frame loop picks them up between frames.

use std::io::BufRead;

use crossing_core::operator::OperatorState;
use tracing::{debug, info, warn};

/// A single operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Switch between day and night lighting.
    ToggleNight,
    /// Pause a running loop or resume a paused one.
    TogglePause,
    /// End the run.
    Stop,
}

impl KeyCommand {
    /// Map a key to its command, ignoring case.
    pub const fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'n' => Some(Self::ToggleNight),
            'p' => Some(Self::TogglePause),
            'q' => Some(Self::Stop),
            _ => None,
        }
    }
}

/// Commands in one input line, in order.
pub fn parse_line(line: &str) -> Vec<KeyCommand> {
    line.chars().filter_map(KeyCommand::from_key).collect()
}

/// Apply one command to the operator state.
pub fn apply(operator: &OperatorState, command: KeyCommand) {
    match command {
        KeyCommand::ToggleNight => {
            let night = operator.toggle_night();
            info!(night, "Lighting toggled");
        }
        KeyCommand::TogglePause => {
            let paused = operator.toggle_pause();
            info!(paused, "Pause toggled");
        }
        KeyCommand::Stop => {
            info!("Stop requested from keyboard");
            operator.request_stop();
        }
    }
}

/// Read commands from `reader` until end of input or a stop.
///
/// Blocks the calling thread.
pub fn read_commands<R: BufRead>(reader: R, operator: &OperatorState) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                for command in parse_line(&line) {
                    apply(operator, command);
                }
                if operator.is_stop_requested() {
                    return;
                }
            }
            Err(err) => {
                warn!(%err, "Failed to read keyboard input");
                return;
            }
        }
    }
    debug!("Keyboard input closed");
}
