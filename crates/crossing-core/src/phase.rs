//! The four-state signal cycle.
//!
//! [`PhaseController`] holds the current [`Phase`] and the time it started.
//! Each call to [`advance`](PhaseController::advance) compares the time in
//! phase with the configured duration and moves to the next phase when it
//! has run out.
//!
//! At most one phase boundary is crossed per call. If the caller was
//! suspended for longer than a phase (or a whole cycle), the controller
//! moves forward by a single phase and restarts its timer at `now`; it does
//! not catch up on the phases that were missed.

use crossing_types::{Phase, SignalFlags};

/// Default green time for either axis.
pub const DEFAULT_GREEN_MS: u64 = 3_000;

/// Default amber time for either axis.
pub const DEFAULT_AMBER_MS: u64 = 1_000;

/// Errors raised when building a duration table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    /// A phase was configured with a zero duration.
    #[error("phase {phase:?} must last at least 1 ms")]
    ZeroDuration {
        /// The offending phase.
        phase: Phase,
    },
}

/// Duration of every phase, in milliseconds. Every entry is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    a_green_ms: u64,
    a_amber_ms: u64,
    b_green_ms: u64,
    b_amber_ms: u64,
}

impl PhaseDurations {
    /// Build a duration table.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::ZeroDuration`] for the first phase whose
    /// duration is 0.
    pub fn new(
        a_green_ms: u64,
        a_amber_ms: u64,
        b_green_ms: u64,
        b_amber_ms: u64,
    ) -> Result<Self, PhaseError> {
        let table = Self {
            a_green_ms,
            a_amber_ms,
            b_green_ms,
            b_amber_ms,
        };
        match Phase::ALL
            .into_iter()
            .find(|phase| table.duration_ms(*phase) == 0)
        {
            Some(phase) => Err(PhaseError::ZeroDuration { phase }),
            None => Ok(table),
        }
    }

    /// Duration of one phase.
    pub const fn duration_ms(&self, phase: Phase) -> u64 {
        match phase {
            Phase::AGreen => self.a_green_ms,
            Phase::AAmber => self.a_amber_ms,
            Phase::BGreen => self.b_green_ms,
            Phase::BAmber => self.b_amber_ms,
        }
    }

    /// Length of one full cycle.
    pub const fn cycle_ms(&self) -> u64 {
        self.a_green_ms
            .saturating_add(self.a_amber_ms)
            .saturating_add(self.b_green_ms)
            .saturating_add(self.b_amber_ms)
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            a_green_ms: DEFAULT_GREEN_MS,
            a_amber_ms: DEFAULT_AMBER_MS,
            b_green_ms: DEFAULT_GREEN_MS,
            b_amber_ms: DEFAULT_AMBER_MS,
        }
    }
}

/// Result of one [`PhaseController::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStep {
    /// Phase after the call.
    pub phase: Phase,
    /// Flags derived from `phase`.
    pub flags: SignalFlags,
    /// Whether this call moved to a new phase.
    pub changed: bool,
}

/// Fixed-duration signal cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseController {
    /// Current phase.
    phase: Phase,
    /// Elapsed time at which `phase` began.
    phase_started_ms: u64,
    /// How long each phase lasts.
    durations: PhaseDurations,
}

impl PhaseController {
    /// Start a controller in [`Phase::AGreen`] at time 0.
    pub const fn new(durations: PhaseDurations) -> Self {
        Self::starting_at(durations, 0)
    }

    /// Start a controller in [`Phase::AGreen`] at the given time.
    pub const fn starting_at(durations: PhaseDurations, start_ms: u64) -> Self {
        Self {
            phase: Phase::AGreen,
            phase_started_ms: start_ms,
            durations,
        }
    }

    /// Evaluate the cycle at `now_ms`.
    ///
    /// Moves to the next phase when the current one has lasted at least its
    /// configured duration; the new phase starts at `now_ms`. A reading
    /// earlier than the phase start counts as no time elapsed.
    pub fn advance(&mut self, now_ms: u64) -> PhaseStep {
        let in_phase = now_ms.saturating_sub(self.phase_started_ms);
        let changed = in_phase >= self.durations.duration_ms(self.phase);
        if changed {
            self.phase = self.phase.next();
            self.phase_started_ms = now_ms;
        }
        PhaseStep {
            phase: self.phase,
            flags: SignalFlags::for_phase(self.phase),
            changed,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Flags for the current phase.
    pub const fn flags(&self) -> SignalFlags {
        SignalFlags::for_phase(self.phase)
    }

    /// Elapsed time at which the current phase began.
    pub const fn phase_started_ms(&self) -> u64 {
        self.phase_started_ms
    }

    /// Time spent in the current phase as of `now_ms`.
    pub const fn phase_elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.phase_started_ms)
    }

    /// Time left in the current phase as of `now_ms` (0 once overdue).
    pub const fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.durations
            .duration_ms(self.phase)
            .saturating_sub(self.phase_elapsed_ms(now_ms))
    }

    /// Length of one full cycle.
    pub const fn cycle_period_ms(&self) -> u64 {
        self.durations.cycle_ms()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn controller() -> PhaseController {
        PhaseController::new(PhaseDurations::default())
    }

    #[test]
    fn starts_in_a_green() {
        let c = controller();
        assert_eq!(c.phase(), Phase::AGreen);
        assert_eq!(c.phase_started_ms(), 0);
        assert!(c.flags().go_x);
    }

    #[test]
    fn holds_until_duration_elapses() {
        let mut c = controller();
        let step = c.advance(2_999);
        assert_eq!(step.phase, Phase::AGreen);
        assert!(!step.changed);
    }

    #[test]
    fn exact_boundaries_produce_exact_transitions() {
        let mut c = controller();
        let expected: [(u64, Phase); 4] = [
            (3_000, Phase::AAmber),
            (4_000, Phase::BGreen),
            (7_000, Phase::BAmber),
            (8_000, Phase::AGreen),
        ];
        for (now, phase) in expected {
            let before = c.advance(now.saturating_sub(1));
            assert!(!before.changed, "changed early at {}", now - 1);
            let step = c.advance(now);
            assert!(step.changed, "no change at {now}");
            assert_eq!(step.phase, phase);
            assert_eq!(c.phase_started_ms(), now);
        }
    }

    #[test]
    fn cycle_is_periodic_over_many_periods() {
        let mut c = controller();
        assert_eq!(c.cycle_period_ms(), 8_000);

        let mut sequence = Vec::new();
        // 1 ms ticks over five full cycles.
        for now in 1..=40_000_u64 {
            let step = c.advance(now);
            if step.changed {
                sequence.push((now, step.phase));
            }
        }

        assert_eq!(sequence.len(), 20);
        for (i, chunk) in sequence.chunks(4).enumerate() {
            let base = 8_000 * u64::try_from(i).unwrap();
            assert_eq!(
                chunk,
                &[
                    (base + 3_000, Phase::AAmber),
                    (base + 4_000, Phase::BGreen),
                    (base + 7_000, Phase::BAmber),
                    (base + 8_000, Phase::AGreen),
                ]
            );
        }
    }

    #[test]
    fn long_gap_crosses_only_one_boundary() {
        let mut c = controller();
        // 25 s is more than three full cycles, but only one phase passes.
        let step = c.advance(25_000);
        assert!(step.changed);
        assert_eq!(step.phase, Phase::AAmber);
        assert_eq!(c.phase_started_ms(), 25_000);

        let step = c.advance(25_000);
        assert!(!step.changed);
        assert_eq!(step.phase, Phase::AAmber);
    }

    #[test]
    fn earlier_reading_counts_as_no_time() {
        let mut c = PhaseController::starting_at(PhaseDurations::default(), 10_000);
        let step = c.advance(5_000);
        assert!(!step.changed);
        assert_eq!(c.remaining_ms(5_000), 3_000);
    }

    #[test]
    fn remaining_time_counts_down() {
        let mut c = controller();
        assert_eq!(c.remaining_ms(0), 3_000);
        assert_eq!(c.remaining_ms(2_500), 500);
        assert_eq!(c.remaining_ms(9_000), 0);
        let _ = c.advance(3_000);
        assert_eq!(c.remaining_ms(3_400), 600);
        assert_eq!(c.phase_elapsed_ms(3_400), 400);
    }

    #[test]
    fn flags_follow_phase() {
        let mut c = controller();
        let step = c.advance(3_000);
        assert_eq!(step.flags, SignalFlags::for_phase(Phase::AAmber));
        let step = c.advance(4_000);
        assert!(step.flags.go_z && step.flags.walk_x);
    }

    #[test]
    fn zero_duration_rejected() {
        let err = PhaseDurations::new(3_000, 0, 3_000, 1_000).unwrap_err();
        assert_eq!(
            err,
            PhaseError::ZeroDuration {
                phase: Phase::AAmber
            }
        );
    }

    #[test]
    fn custom_durations() {
        let durations = PhaseDurations::new(500, 100, 700, 200).unwrap();
        assert_eq!(durations.cycle_ms(), 1_500);
        let mut c = PhaseController::new(durations);
        assert!(c.advance(500).changed);
        assert!(c.advance(600).changed);
        assert_eq!(c.phase(), Phase::BGreen);
    }
}
