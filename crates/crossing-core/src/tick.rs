//! One frame of the crossing simulation.
//!
//! Each call to [`run_tick`] runs these steps in order:
//!
//! 1. **Signals** -- advance the [`PhaseController`] to `now_ms` (at most
//!    one phase transition).
//! 2. **Motion** -- move every actor by the time since the previous frame
//!    under the flags of the phase chosen in step 1.
//! 3. **Scene** -- collect fixture updates, the lighting update and actor
//!    views into a [`FrameSnapshot`] for the renderer.
//!
//! The frame is deterministic given the same state, reading and lighting
//! mode.

use std::time::Duration;

use crossing_types::{FrameSnapshot, LightingMode};
use tracing::{debug, info};

use crate::config::{ConfigError, CrossingConfig};
use crate::motion::{self, Actor};
use crate::phase::PhaseController;
use crate::scene::SceneAdapter;

/// Everything the frame loop mutates.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The signal cycle.
    pub phase: PhaseController,
    /// Vehicles and pedestrians.
    pub actors: Vec<Actor>,
    /// Change tracking for renderer output.
    pub scene: SceneAdapter,
    /// Lighting mode used in the previous frame.
    pub lighting: LightingMode,
    /// Number of frames run so far.
    pub frame: u64,
    /// Clock reading of the previous frame.
    pub last_tick_ms: u64,
}

impl SimulationState {
    /// Build a state at frame 0 around the given controller and actors.
    ///
    /// `map_swap` selects the head assignment; lighting starts in day mode.
    pub const fn new(phase: PhaseController, actors: Vec<Actor>, map_swap: bool) -> Self {
        Self {
            phase,
            actors,
            scene: SceneAdapter::new(map_swap),
            lighting: LightingMode::Day,
            frame: 0,
            last_tick_ms: 0,
        }
    }

    /// Build the starting state from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the signal durations are unusable.
    pub fn from_config(config: &CrossingConfig) -> Result<Self, ConfigError> {
        let durations = config.signals.durations()?;
        let actors = motion::initial_actors(
            config.traffic.vehicles_per_axis,
            config.traffic.vehicle_speed,
            config.traffic.pedestrian_speed,
        );
        let mut state = Self::new(
            PhaseController::new(durations),
            actors,
            config.display.map_swap,
        );
        state.lighting = LightingMode::from_night(config.display.start_at_night);
        Ok(state)
    }
}

/// Run one frame at clock reading `now_ms`.
///
/// `night` selects the lighting mode for this frame. The first frame
/// always carries the full set of fixture commands and a lighting profile.
/// A reading earlier than the previous one moves nothing.
pub fn run_tick(state: &mut SimulationState, now_ms: u64, night: bool) -> FrameSnapshot {
    state.frame = state.frame.saturating_add(1);
    let frame = state.frame;

    // --- Signals ---
    let previous = state.phase.phase();
    let step = state.phase.advance(now_ms);
    if step.changed {
        info!(
            frame,
            elapsed_ms = now_ms,
            from = ?previous,
            to = ?step.phase,
            "Phase changed"
        );
    }

    // --- Motion ---
    let dt_secs = Duration::from_millis(now_ms.saturating_sub(state.last_tick_ms)).as_secs_f64();
    motion::step(&mut state.actors, step.flags, dt_secs);
    state.last_tick_ms = state.last_tick_ms.max(now_ms);

    // --- Scene ---
    let lighting = LightingMode::from_night(night);
    if lighting != state.lighting {
        info!(frame, from = ?state.lighting, to = ?lighting, "Lighting mode changed");
        state.lighting = lighting;
    }
    let fixture_updates = state.scene.fixture_updates(step.phase);
    let lighting_update = state.scene.lighting_update(lighting);

    debug!(
        frame,
        elapsed_ms = now_ms,
        dt_secs,
        fixtures = fixture_updates.len(),
        "Frame complete"
    );

    FrameSnapshot {
        frame,
        elapsed_ms: now_ms,
        phase: step.phase,
        phase_changed: step.changed,
        phase_remaining_ms: state.phase.remaining_ms(now_ms),
        flags: step.flags,
        fixture_updates,
        actors: SceneAdapter::actor_snapshots(&state.actors),
        lighting_mode: lighting,
        lighting_update,
    }
}
