//! Frame clock: the time source for the tick loop.
//!
//! The simulation only ever sees monotonically non-decreasing elapsed
//! milliseconds since the run started. [`MonotonicClock`] reads the tokio
//! monotonic clock (so paused-time tests drive it deterministically) and
//! [`ManualClock`] hands out scripted readings.
//!
//! # Design Principles
//!
//! - Readings saturate instead of overflowing.
//! - Time spent paused by the operator is excluded, so resuming does not
//!   produce one huge step.

use std::time::Duration;

use tokio::time::Instant;

/// A source of elapsed milliseconds for the frame loop.
pub trait FrameClock: Send {
    /// Milliseconds elapsed since the run started.
    ///
    /// Successive readings never decrease.
    fn elapsed_ms(&mut self) -> u64;

    /// Remove a stretch of wall time (for example an operator pause) from
    /// all future readings. The default ignores it.
    fn exclude(&mut self, _span: Duration) {}
}

/// Clock backed by [`tokio::time::Instant`].
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    /// When the run started.
    started: Instant,
    /// Total time removed via [`FrameClock::exclude`].
    excluded: Duration,
    /// Last reading, used to keep readings non-decreasing.
    last_ms: u64,
}

impl MonotonicClock {
    /// Start a clock at the current instant.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            excluded: Duration::ZERO,
            last_ms: 0,
        }
    }
}

impl FrameClock for MonotonicClock {
    fn elapsed_ms(&mut self) -> u64 {
        let running = self.started.elapsed().saturating_sub(self.excluded);
        let ms = u64::try_from(running.as_millis()).unwrap_or(u64::MAX);
        self.last_ms = self.last_ms.max(ms);
        self.last_ms
    }

    fn exclude(&mut self, span: Duration) {
        self.excluded = self.excluded.saturating_add(span);
    }
}

/// Scripted clock for tests and offline replays.
///
/// Each reading returns the current time and then moves it forward by
/// `step_ms`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualClock {
    /// Reading returned by the next call to `elapsed_ms`.
    now_ms: u64,
    /// Amount added after every reading.
    step_ms: u64,
}

impl ManualClock {
    /// A clock frozen at `now_ms` until moved with [`advance`](Self::advance).
    pub const fn at(now_ms: u64) -> Self {
        Self { now_ms, step_ms: 0 }
    }

    /// A clock starting at 0 that advances by `step_ms` after every reading.
    pub const fn stepping(step_ms: u64) -> Self {
        Self { now_ms: 0, step_ms }
    }

    /// Move the clock forward.
    pub const fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Return the reading the next call will produce.
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl FrameClock for ManualClock {
    fn elapsed_ms(&mut self) -> u64 {
        let now = self.now_ms;
        self.now_ms = self.now_ms.saturating_add(self.step_ms);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_steps_after_each_reading() {
        let mut clock = ManualClock::stepping(16);
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.elapsed_ms(), 16);
        assert_eq!(clock.elapsed_ms(), 32);
    }

    #[test]
    fn manual_clock_frozen_until_advanced() {
        let mut clock = ManualClock::at(500);
        assert_eq!(clock.elapsed_ms(), 500);
        assert_eq!(clock.elapsed_ms(), 500);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 750);
        assert_eq!(clock.elapsed_ms(), 750);
    }

    #[test]
    fn manual_clock_saturates() {
        let mut clock = ManualClock::at(u64::MAX);
        clock.advance(10);
        assert_eq!(clock.elapsed_ms(), u64::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn monotonic_clock_follows_tokio_time() {
        let mut clock = MonotonicClock::start();
        assert_eq!(clock.elapsed_ms(), 0);
        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(clock.elapsed_ms(), 1_500);
    }

    #[tokio::test(start_paused = true)]
    async fn monotonic_clock_excludes_paused_time() {
        let mut clock = MonotonicClock::start();
        tokio::time::advance(Duration::from_millis(1_000)).await;
        clock.exclude(Duration::from_millis(400));
        assert_eq!(clock.elapsed_ms(), 600);
    }

    #[tokio::test(start_paused = true)]
    async fn monotonic_clock_never_goes_backwards() {
        let mut clock = MonotonicClock::start();
        tokio::time::advance(Duration::from_millis(1_000)).await;
        assert_eq!(clock.elapsed_ms(), 1_000);
        clock.exclude(Duration::from_millis(300));
        assert_eq!(clock.elapsed_ms(), 1_000);
    }
}
