//! Operator control state for a running crossing.
//!
//! Shared between the frame loop and whatever drives it interactively (the
//! engine's keyboard task). The operator can pause and resume, change the
//! frame interval, switch day/night lighting and request a clean stop.
//!
//! All hot-path fields are atomics so the frame loop never takes a lock to
//! read them.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::config::EngineConfig;

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// Reached the configured `max_frames` limit.
    MaxFramesReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// An operator issued a stop command.
    OperatorStop,
}

/// Shared operator control state, usually held in an `Arc`.
#[derive(Debug)]
pub struct OperatorState {
    /// Whether the frame loop is paused.
    paused: AtomicBool,

    /// Wakes the frame loop on resume or stop.
    resume_notify: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Milliseconds between frames (runtime-adjustable).
    frame_interval_ms: AtomicU64,

    /// Whether night lighting is on.
    night: AtomicBool,

    /// Wall-clock time when the run started.
    started_at: DateTime<Utc>,

    /// Maximum number of frames (0 = unlimited).
    max_frames: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,

    /// Reason the run ended, if it has.
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Create operator state from the engine configuration.
    ///
    /// A `frame_interval_ms` of 0 is raised to 1.
    pub fn new(engine: &EngineConfig, start_at_night: bool) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            frame_interval_ms: AtomicU64::new(engine.frame_interval_ms.max(1)),
            night: AtomicBool::new(start_at_night),
            started_at: Utc::now(),
            max_frames: engine.max_frames,
            max_real_time_seconds: engine.max_real_time_seconds,
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Check whether the frame loop is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause the frame loop. It sleeps until resumed or stopped.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume the frame loop and wake it.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Flip between paused and running. Returns `true` if now paused.
    pub fn toggle_pause(&self) -> bool {
        let was_paused = self.paused.fetch_xor(true, Ordering::AcqRel);
        if was_paused {
            self.resume_notify.notify_one();
        }
        !was_paused
    }

    /// Wait until the loop is no longer paused or a stop was requested.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop. Also wakes a paused loop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Record the reason the run ended.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        let mut guard = self.end_reason.lock().await;
        *guard = Some(reason);
    }

    /// Get the reason the run ended, if it has.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Frame pacing
    // -----------------------------------------------------------------------

    /// Current frame interval in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms.load(Ordering::Acquire)
    }

    /// Set the frame interval. Must be at least 1 ms.
    ///
    /// Returns the previous interval, or `None` if `ms` was rejected.
    pub fn set_frame_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms == 0 {
            return None;
        }
        Some(self.frame_interval_ms.swap(ms, Ordering::AcqRel))
    }

    // -----------------------------------------------------------------------
    // Lighting
    // -----------------------------------------------------------------------

    /// Whether night lighting is on.
    pub fn is_night(&self) -> bool {
        self.night.load(Ordering::Acquire)
    }

    /// Switch night lighting on or off.
    pub fn set_night(&self, night: bool) {
        self.night.store(night, Ordering::Release);
    }

    /// Flip day/night lighting. Returns `true` if now night.
    pub fn toggle_night(&self) -> bool {
        !self.night.fetch_xor(true, Ordering::AcqRel)
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// `true` if `max_frames > 0` and `frames >= max_frames`.
    pub const fn frame_limit_reached(&self, frames: u64) -> bool {
        self.max_frames > 0 && frames >= self.max_frames
    }

    /// `true` if `max_real_time_seconds > 0` and that many wall-clock
    /// seconds have passed since start.
    pub fn time_limit_reached(&self) -> bool {
        self.max_real_time_seconds > 0 && self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Return elapsed wall-clock seconds since start.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // Negative if the wall clock stepped back; treat as 0.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Get the configured max frames.
    pub const fn max_frames(&self) -> u64 {
        self.max_frames
    }

    /// Get the configured max real-time seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}
