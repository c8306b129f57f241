//! Breathing phase computation.
//!
//! The phase is always derived from elapsed wall time, never from chained
//! per-phase delays, so scheduling jitter cannot accumulate drift. Phase
//! transitions are edge-triggered: a transition is reported only when the
//! derived phase differs from the previously observed one, which keeps
//! voice cues and animations from re-firing on every tick.

use std::time::Duration;

use crate::types::{Phase, SessionConfig};

// ============================================================================
// PhaseTransition
// ============================================================================

/// A phase-entry event, emitted once per phase change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    /// The phase just entered
    pub phase: Phase,
    /// Display label for the phase
    pub label: &'static str,
    /// Spoken cue for the phase, if any
    pub spoken_cue: Option<&'static str>,
}

impl PhaseTransition {
    fn entering(phase: Phase) -> Self {
        Self {
            phase,
            label: phase.label(),
            spoken_cue: phase.spoken_cue(),
        }
    }
}

// ============================================================================
// PhaseScheduler
// ============================================================================

/// Derives the breathing phase from elapsed time within the cycle.
pub struct PhaseScheduler;

impl PhaseScheduler {
    /// Returns the breathing phase at `elapsed` for the given config.
    ///
    /// Pure and deterministic: `position = elapsed mod cycle_length`,
    /// Inhale while `position < inhale`, Hold while
    /// `position < inhale + hold`, Exhale otherwise.
    pub fn phase_at(elapsed: Duration, config: &SessionConfig) -> Phase {
        let cycle = config.cycle_length();
        debug_assert!(!cycle.is_zero(), "validated config has non-zero cycle");

        let position = Duration::from_nanos((elapsed.as_nanos() % cycle.as_nanos()) as u64);
        if position < config.inhale {
            Phase::Inhale
        } else if position < config.inhale + config.hold {
            Phase::Hold
        } else {
            Phase::Exhale
        }
    }

    /// Returns the transition event if the derived phase differs from the
    /// last observed one, updating `last` to the new phase.
    pub fn transition(
        elapsed: Duration,
        config: &SessionConfig,
        last: &mut Option<Phase>,
    ) -> Option<PhaseTransition> {
        let phase = Self::phase_at(elapsed, config);
        if *last == Some(phase) {
            return None;
        }
        *last = Some(phase);
        Some(PhaseTransition::entering(phase))
    }
}

// ============================================================================
// Tests
// ============================================================================
