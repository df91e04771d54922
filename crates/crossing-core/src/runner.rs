//! Frame loop runner with operator controls.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives the crossing frame by frame with support for:
//!
//! - **Bounded runs**: stop after `max_frames` or `max_real_time_seconds`
//! - **Pause/resume**: paused time is removed from the frame clock
//! - **Variable frame rate**: interval adjustable at runtime
//! - **Day/night**: the operator's lighting choice is read every frame
//! - **Operator stop**: clean stop between frames
//!
//! The runner wraps the single-frame [`run_tick`] function and hands every
//! [`FrameSnapshot`] to a [`FrameSink`].
//!
//! [`run_tick`]: crate::tick::run_tick

use std::sync::Arc;
use std::time::Duration;

use crossing_types::{FrameSnapshot, RunId};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::clock::FrameClock;
use crate::operator::{OperatorState, SimulationEndReason};
use crate::tick::{self, SimulationState};

/// Errors a [`FrameSink`] can report.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing the frame failed.
    #[error("failed to write frame: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding the frame failed.
    #[error("failed to serialize frame: {source}")]
    Serialize {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Errors that can occur during the run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The frame sink failed.
    #[error("frame sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: SinkError,
    },
}

/// Result of a run.
#[derive(Debug)]
pub struct SimulationResult {
    /// Identifier of this run.
    pub run_id: RunId,
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// The last frame, if any frame ran.
    pub final_frame: Option<FrameSnapshot>,
    /// Total number of frames executed.
    pub total_frames: u64,
}

/// Receives every frame the loop produces.
pub trait FrameSink: Send {
    /// Called after each frame.
    ///
    /// # Errors
    ///
    /// Returning an error ends the run with [`RunnerError::Sink`].
    fn on_frame(&mut self, frame: &FrameSnapshot) -> Result<(), SinkError>;
}

/// A sink that discards frames.
pub struct NoOpSink;

impl FrameSink for NoOpSink {
    fn on_frame(&mut self, _frame: &FrameSnapshot) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Run the frame loop until a termination condition is met.
///
/// # Arguments
///
/// * `state` - Mutable simulation state (signals, actors, scene tracking)
/// * `clock` - Source of elapsed milliseconds
/// * `operator` - Shared operator control state
/// * `sink` - Receives every frame
///
/// # Errors
///
/// Returns [`RunnerError::Sink`] if the sink rejects a frame.
pub async fn run_simulation(
    state: &mut SimulationState,
    clock: &mut dyn FrameClock,
    operator: &Arc<OperatorState>,
    sink: &mut dyn FrameSink,
) -> Result<SimulationResult, RunnerError> {
    let run_id = RunId::new();
    let mut last_frame: Option<FrameSnapshot> = None;
    let mut total_frames: u64 = 0;

    info!(
        %run_id,
        max_frames = operator.max_frames(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        frame_interval_ms = operator.frame_interval_ms(),
        cycle_ms = state.phase.cycle_period_ms(),
        "Simulation starting"
    );

    loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!("Simulation paused, waiting for resume...");
            let paused_at = Instant::now();
            operator.wait_if_paused().await;
            clock.exclude(paused_at.elapsed());
            info!(paused_ms = paused_at.elapsed().as_millis(), "Simulation resumed");
        }

        // --- Check stop request (before frame) ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            return Ok(finish(
                operator,
                run_id,
                SimulationEndReason::OperatorStop,
                last_frame,
                total_frames,
            )
            .await);
        }

        // --- Check time limit (before frame) ---
        if operator.time_limit_reached() {
            info!(
                max_seconds = operator.max_real_time_seconds(),
                elapsed = operator.elapsed_seconds(),
                "Real-time limit reached"
            );
            return Ok(finish(
                operator,
                run_id,
                SimulationEndReason::MaxRealTimeReached,
                last_frame,
                total_frames,
            )
            .await);
        }

        // --- Execute frame ---
        let now_ms = clock.elapsed_ms();
        let frame = tick::run_tick(state, now_ms, operator.is_night());
        total_frames = total_frames.saturating_add(1);

        sink.on_frame(&frame)?;

        // --- Check frame limit (after frame) ---
        if operator.frame_limit_reached(total_frames) {
            info!(
                frame = frame.frame,
                max_frames = operator.max_frames(),
                "Frame limit reached"
            );
            return Ok(finish(
                operator,
                run_id,
                SimulationEndReason::MaxFramesReached,
                Some(frame),
                total_frames,
            )
            .await);
        }

        last_frame = Some(frame);

        // --- Sleep for frame interval ---
        tokio::time::sleep(Duration::from_millis(operator.frame_interval_ms())).await;
    }
}

/// Record the end reason and build the result.
async fn finish(
    operator: &OperatorState,
    run_id: RunId,
    end_reason: SimulationEndReason,
    final_frame: Option<FrameSnapshot>,
    total_frames: u64,
) -> SimulationResult {
    operator.set_end_reason(end_reason).await;
    SimulationResult {
        run_id,
        end_reason,
        final_frame,
        total_frames,
    }
}

/// Log how a run ended.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        run_id = %result.run_id,
        reason = ?result.end_reason,
        total_frames = result.total_frames,
        final_frame = result.final_frame.as_ref().map(|f| f.frame),
        "Simulation ended"
    );

    if let Some(ref frame) = result.final_frame {
        info!(
            frame = frame.frame,
            elapsed_ms = frame.elapsed_ms,
            phase = ?frame.phase,
            lighting = ?frame.lighting_mode,
            "Final frame"
        );
    } else {
        warn!("Simulation ended with no frames executed");
    }
}
