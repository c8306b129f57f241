//! Core data types for the breathing timer.
//!
//! This module defines the data structures used for:
//! - Breathing phase representation
//! - Session configuration with validation
//! - Session state with pause-preserving elapsed time

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

// ============================================================================
// Phase
// ============================================================================

/// Represents the current phase of a breathing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Session has not started
    Idle,
    /// Breathing in
    Inhale,
    /// Holding the breath
    Hold,
    /// Breathing out
    Exhale,
    /// Session is paused
    Paused,
    /// Session finished
    Complete,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
            Phase::Paused => "paused",
            Phase::Complete => "complete",
        }
    }

    /// Returns true if this is one of the three breathing phases.
    pub fn is_breathing(&self) -> bool {
        matches!(self, Phase::Inhale | Phase::Hold | Phase::Exhale)
    }

    /// Returns the on-screen label for the phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "ready",
            Phase::Inhale => "breathe in",
            Phase::Hold => "hold",
            Phase::Exhale => "breathe out",
            Phase::Paused => "paused",
            Phase::Complete => "session complete",
        }
    }

    /// Returns the spoken cue announced when the phase is entered, if any.
    pub fn spoken_cue(&self) -> Option<&'static str> {
        match self {
            Phase::Inhale => Some("Breathe in slowly"),
            Phase::Hold => Some("Hold your breath"),
            Phase::Exhale => Some("Exhale slowly"),
            Phase::Complete => Some("Session complete. Well done."),
            _ => None,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors produced by session configuration validation.
///
/// An invalid configuration is rejected at the settings boundary; it never
/// mutates session state. User-facing range limits (session minutes,
/// reminder minutes) are enforced by the CLI argument parsers; the core
/// only requires every duration to be positive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configured duration is zero.
    #[error("{field} duration must be greater than zero")]
    ZeroDuration {
        /// Name of the offending field
        field: &'static str,
    },
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Configuration for a breathing session.
///
/// Defaults follow the 4-7-8 breathing pattern with a five minute session
/// and a break reminder every two hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inhale phase duration (1-60 seconds)
    pub inhale: Duration,
    /// Hold phase duration (1-60 seconds)
    pub hold: Duration,
    /// Exhale phase duration (1-60 seconds)
    pub exhale: Duration,
    /// Total session duration (1-30 minutes)
    pub total: Duration,
    /// Break reminder interval (30-180 minutes)
    pub reminder_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inhale: Duration::from_secs(4),
            hold: Duration::from_secs(7),
            exhale: Duration::from_secs(8),
            total: Duration::from_secs(5 * 60),
            reminder_interval: Duration::from_secs(120 * 60),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with the specified inhale duration.
    pub fn with_inhale(mut self, duration: Duration) -> Self {
        self.inhale = duration;
        self
    }

    /// Creates a configuration with the specified hold duration.
    pub fn with_hold(mut self, duration: Duration) -> Self {
        self.hold = duration;
        self
    }

    /// Creates a configuration with the specified exhale duration.
    pub fn with_exhale(mut self, duration: Duration) -> Self {
        self.exhale = duration;
        self
    }

    /// Creates a configuration with the specified total duration.
    pub fn with_total(mut self, duration: Duration) -> Self {
        self.total = duration;
        self
    }

    /// Creates a configuration with the specified reminder interval.
    pub fn with_reminder_interval(mut self, duration: Duration) -> Self {
        self.reminder_interval = duration;
        self
    }

    /// Returns the length of one full inhale-hold-exhale cycle.
    ///
    /// The total duration is not required to be a multiple of this; the
    /// last cycle may be cut short by session completion.
    pub fn cycle_length(&self) -> Duration {
        self.inhale + self.hold + self.exhale
    }

    /// Validates that every configured duration is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, duration) in [
            ("inhale", self.inhale),
            ("hold", self.hold),
            ("exhale", self.exhale),
            ("total", self.total),
            ("reminder interval", self.reminder_interval),
        ] {
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration { field: name });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SessionState
// ============================================================================

/// Represents the current state of a breathing session.
///
/// Elapsed time is computed from wall-clock instants rather than tick
/// counting, so a delayed or skipped tick never desyncs the phase from
/// elapsed time. Pausing folds running time into `accumulated`; resuming
/// records a fresh `started_at`, preserving already-elapsed time.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current phase of the session
    pub phase: Phase,
    /// Start of the current running stretch, set on (re)start
    started_at: Option<Instant>,
    /// Time accumulated over previous running stretches
    accumulated: Duration,
    /// Last breathing phase emitted, for edge-triggered transitions
    pub last_breath_phase: Option<Phase>,
}

impl SessionState {
    /// Creates a new state in `Idle`.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            started_at: None,
            accumulated: Duration::ZERO,
            last_breath_phase: None,
        }
    }

    /// Begins a fresh session from zero elapsed time.
    pub fn start_fresh(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        self.started_at = Some(now);
        self.phase = Phase::Inhale;
        self.last_breath_phase = None;
    }

    /// Resumes a paused session, preserving accumulated elapsed time.
    pub fn resume(&mut self, now: Instant) {
        self.started_at = Some(now);
        // The next tick recomputes the breathing phase from elapsed time.
        self.phase = Phase::Inhale;
        self.last_breath_phase = None;
    }

    /// Pauses the session, folding running time into the accumulator.
    pub fn pause(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
        self.phase = Phase::Paused;
        self.last_breath_phase = None;
    }

    /// Resets the session to `Idle` with zero elapsed time.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.last_breath_phase = None;
    }

    /// Marks the session complete, freezing elapsed time.
    pub fn complete(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started);
        }
        self.phase = Phase::Complete;
        self.last_breath_phase = None;
    }

    /// Returns elapsed session time as of `now`.
    ///
    /// Monotonically non-decreasing while running; frozen while paused.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started) => self.accumulated + now.saturating_duration_since(started),
            None => self.accumulated,
        }
    }

    /// Returns true if the session is actively running.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns true if the session is paused.
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Phase Tests
    // ------------------------------------------------------------------------

    mod phase_tests {
        use super::*;

        #[test]
        fn test_default_is_idle() {
            assert_eq!(Phase::default(), Phase::Idle);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(Phase::Idle.as_str(), "idle");
            assert_eq!(Phase::Inhale.as_str(), "inhale");
            assert_eq!(Phase::Hold.as_str(), "hold");
            assert_eq!(Phase::Exhale.as_str(), "exhale");
            assert_eq!(Phase::Paused.as_str(), "paused");
            assert_eq!(Phase::Complete.as_str(), "complete");
        }

        #[test]
        fn test_is_breathing() {
            assert!(!Phase::Idle.is_breathing());
            assert!(Phase::Inhale.is_breathing());
            assert!(Phase::Hold.is_breathing());
            assert!(Phase::Exhale.is_breathing());
            assert!(!Phase::Paused.is_breathing());
            assert!(!Phase::Complete.is_breathing());
        }

        #[test]
        fn test_spoken_cue_only_for_breath_and_complete() {
            assert!(Phase::Inhale.spoken_cue().is_some());
            assert!(Phase::Hold.spoken_cue().is_some());
            assert!(Phase::Exhale.spoken_cue().is_some());
            assert!(Phase::Complete.spoken_cue().is_some());
            assert!(Phase::Idle.spoken_cue().is_none());
            assert!(Phase::Paused.spoken_cue().is_none());
        }

        #[test]
        fn test_serialize_deserialize() {
            let phase = Phase::Inhale;
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, "\"inhale\"");

            let deserialized: Phase = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, Phase::Inhale);
        }
    }

    // ------------------------------------------------------------------------
    // SessionConfig Tests
    // ------------------------------------------------------------------------

    mod session_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = SessionConfig::default();
            assert_eq!(config.inhale, Duration::from_secs(4));
            assert_eq!(config.hold, Duration::from_secs(7));
            assert_eq!(config.exhale, Duration::from_secs(8));
            assert_eq!(config.total, Duration::from_secs(300));
            assert_eq!(config.reminder_interval, Duration::from_secs(7200));
        }

        #[test]
        fn test_builder_pattern() {
            let config = SessionConfig::default()
                .with_inhale(Duration::from_secs(5))
                .with_hold(Duration::from_secs(5))
                .with_exhale(Duration::from_secs(10))
                .with_total(Duration::from_secs(600))
                .with_reminder_interval(Duration::from_secs(60 * 60));

            assert_eq!(config.inhale, Duration::from_secs(5));
            assert_eq!(config.hold, Duration::from_secs(5));
            assert_eq!(config.exhale, Duration::from_secs(10));
            assert_eq!(config.total, Duration::from_secs(600));
            assert_eq!(config.reminder_interval, Duration::from_secs(3600));
        }

        #[test]
        fn test_cycle_length() {
            let config = SessionConfig::default();
            assert_eq!(config.cycle_length(), Duration::from_secs(19));
        }

        #[test]
        fn test_validate_default_ok() {
            assert!(SessionConfig::default().validate().is_ok());
        }

        #[test]
        fn test_validate_minimal_durations_ok() {
            let config = SessionConfig {
                inhale: Duration::from_millis(1),
                hold: Duration::from_millis(1),
                exhale: Duration::from_millis(1),
                total: Duration::from_millis(1),
                reminder_interval: Duration::from_millis(1),
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_validate_zero_phase() {
            let config = SessionConfig::default().with_hold(Duration::ZERO);
            assert_eq!(
                config.validate(),
                Err(ConfigError::ZeroDuration { field: "hold" })
            );
        }

        #[test]
        fn test_validate_zero_total() {
            let config = SessionConfig::default().with_total(Duration::ZERO);
            assert_eq!(
                config.validate(),
                Err(ConfigError::ZeroDuration { field: "total" })
            );
        }

        #[test]
        fn test_validate_zero_reminder_interval() {
            let config = SessionConfig::default().with_reminder_interval(Duration::ZERO);
            assert_eq!(
                config.validate(),
                Err(ConfigError::ZeroDuration {
                    field: "reminder interval"
                })
            );
        }

        #[test]
        fn test_serialize_deserialize() {
            let config = SessionConfig::default();
            let json = serde_json::to_string(&config).unwrap();
            let deserialized: SessionConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config, deserialized);
        }
    }

    // ------------------------------------------------------------------------
    // SessionState Tests
    // ------------------------------------------------------------------------

    mod session_state_tests {
        use super::*;
        use tokio::time::{self, Duration as TokioDuration};

        #[test]
        fn test_new_state() {
            let state = SessionState::new();
            assert_eq!(state.phase, Phase::Idle);
            assert!(!state.is_running());
            assert!(!state.is_paused());
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_fresh_resets_elapsed() {
            let mut state = SessionState::new();
            let t0 = Instant::now();
            state.start_fresh(t0);

            assert!(state.is_running());
            assert_eq!(state.elapsed(t0), Duration::ZERO);

            time::advance(TokioDuration::from_secs(3)).await;
            assert_eq!(state.elapsed(Instant::now()), Duration::from_secs(3));
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_freezes_elapsed() {
            let mut state = SessionState::new();
            state.start_fresh(Instant::now());

            time::advance(TokioDuration::from_secs(10)).await;
            state.pause(Instant::now());

            assert!(state.is_paused());
            time::advance(TokioDuration::from_secs(42)).await;
            assert_eq!(state.elapsed(Instant::now()), Duration::from_secs(10));
        }

        #[tokio::test(start_paused = true)]
        async fn test_resume_preserves_elapsed() {
            let mut state = SessionState::new();
            state.start_fresh(Instant::now());

            time::advance(TokioDuration::from_secs(8)).await;
            state.pause(Instant::now());

            time::advance(TokioDuration::from_secs(60)).await;
            state.resume(Instant::now());

            time::advance(TokioDuration::from_secs(2)).await;
            assert_eq!(state.elapsed(Instant::now()), Duration::from_secs(10));
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset_clears_everything() {
            let mut state = SessionState::new();
            state.start_fresh(Instant::now());
            time::advance(TokioDuration::from_secs(5)).await;

            state.reset();

            assert_eq!(state.phase, Phase::Idle);
            assert!(!state.is_running());
            assert_eq!(state.elapsed(Instant::now()), Duration::ZERO);
        }

        #[tokio::test(start_paused = true)]
        async fn test_complete_freezes_elapsed() {
            let mut state = SessionState::new();
            state.start_fresh(Instant::now());
            time::advance(TokioDuration::from_secs(19)).await;

            state.complete(Instant::now());

            assert_eq!(state.phase, Phase::Complete);
            time::advance(TokioDuration::from_secs(100)).await;
            assert_eq!(state.elapsed(Instant::now()), Duration::from_secs(19));
        }
    }
}
