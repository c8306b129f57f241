//! Top-level session state machine.
//!
//! `SessionController` exclusively owns the session and reminder state and
//! orchestrates the phase scheduler, progress tracker, and reminder
//! scheduler. All control operations are idempotent: calling one from a
//! state that forbids it is a silent no-op, never an error.
//!
//! Every operation takes the current instant explicitly, so the controller
//! is deterministic under test without a running clock.

use tokio::time::Instant;
use tracing::{debug, info};

use crate::notify::NotificationSink;
use crate::types::{ConfigError, Phase, SessionConfig, SessionState};

use super::phase::PhaseScheduler;
use super::progress::ProgressTracker;
use super::reminder::{ReminderAction, ReminderScheduler};

/// Spoken cue for a break reminder fire.
pub const REMINDER_PHRASE: &str = "Time for a break. Let's take a deep breath.";

// ============================================================================
// SessionController
// ============================================================================

/// Orchestrates a breathing session and reports to a notification sink.
pub struct SessionController<S: NotificationSink> {
    config: SessionConfig,
    state: SessionState,
    reminder: ReminderScheduler,
    sink: S,
    visible: bool,
}

impl<S: NotificationSink> SessionController<S> {
    /// Creates a controller for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any duration is out of range; no
    /// session state is created for an invalid configuration.
    pub fn new(config: SessionConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let reminder = ReminderScheduler::new(config.reminder_interval);
        Ok(Self {
            config,
            state: SessionState::new(),
            reminder,
            sink,
            visible: true,
        })
    }

    /// Starts a fresh session from `Idle`, or resumes from `Paused`.
    ///
    /// A fresh start resets elapsed time and starts ambient audio from the
    /// beginning; a resume preserves elapsed time and resumes audio in
    /// place. Calling from `Running` or `Complete` is a no-op.
    pub fn start(&mut self, now: Instant) {
        match self.state.phase {
            Phase::Idle => {
                info!("session started");
                self.state.start_fresh(now);
                self.reminder.begin(now);
                self.sink.set_audio_playing(true);
                self.sink.set_controls_enabled(false, true);
            }
            Phase::Paused => {
                info!("session resumed");
                self.state.resume(now);
                self.reminder.begin(now);
                self.sink.set_audio_playing(true);
                self.sink.set_controls_enabled(false, true);
            }
            _ => {
                debug!(phase = self.state.phase.as_str(), "start ignored");
            }
        }
    }

    /// Pauses a running session; no-op otherwise.
    ///
    /// Freezes elapsed accumulation and synchronously cancels every pending
    /// reminder and escalation deadline.
    pub fn pause(&mut self, now: Instant) {
        if !self.state.is_running() {
            debug!(phase = self.state.phase.as_str(), "pause ignored");
            return;
        }
        info!("session paused");
        self.state.pause(now);
        self.reminder.cancel();
        self.sink.set_audio_playing(false);
        self.sink.render_phase(Phase::Paused, Phase::Paused.label());
        self.sink.set_controls_enabled(true, false);
    }

    /// Resets to `Idle` from any state, clearing elapsed and reminder state.
    pub fn reset(&mut self, now: Instant) {
        if self.state.is_running() {
            self.state.pause(now);
            self.sink.set_audio_playing(false);
        }
        info!("session reset");
        self.state.reset();
        self.reminder.cancel();
        self.sink.hide_reminder_overlay();
        self.sink.render_progress(0.0);
        self.sink.render_phase(Phase::Idle, Phase::Idle.label());
        self.sink.set_controls_enabled(true, false);
    }

    /// Acknowledges a fired break reminder, clearing its escalations and
    /// re-arming the next fire a full interval from `now`.
    pub fn acknowledge_reminder(&mut self, now: Instant) {
        self.reminder.acknowledge(now);
        self.sink.hide_reminder_overlay();
    }

    /// Sets the host visibility hint, consulted at reminder fire time.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Advances the session as of `now`. Driven by the host tick.
    ///
    /// Within one tick the order is fixed: the breathing phase is recomputed
    /// from elapsed time, then the completion check runs (completion
    /// preempts any phase emission for that tick), then an edge-triggered
    /// phase transition is emitted, then progress, then reminder deadlines.
    pub fn tick(&mut self, now: Instant) {
        if !self.state.is_running() {
            return;
        }

        let elapsed = self.state.elapsed(now);

        // Phase recomputation happens before the completion check, and
        // completion preempts the transition emission for this tick.
        let transition =
            PhaseScheduler::transition(elapsed, &self.config, &mut self.state.last_breath_phase);

        if elapsed >= self.config.total {
            self.handle_complete(now);
            return;
        }

        if let Some(transition) = transition {
            self.state.phase = transition.phase;
            self.sink.render_phase(transition.phase, transition.label);
            if let Some(cue) = transition.spoken_cue {
                self.sink.play_cue(cue);
            }
        }

        self.sink
            .render_progress(ProgressTracker::fraction(elapsed, self.config.total));

        for action in self.reminder.poll(now, self.visible) {
            match action {
                ReminderAction::Fire => {
                    debug!("break reminder fired");
                    self.sink.show_reminder_pulse();
                    self.sink.play_cue(REMINDER_PHRASE);
                }
                ReminderAction::ShowOverlay => {
                    debug!("break reminder escalated to overlay");
                    self.sink.show_reminder_overlay();
                }
                ReminderAction::AutoPause => {
                    info!("break reminder unacknowledged, pausing session");
                    self.pause(now);
                }
            }
        }
    }

    /// Handles session completion: stops audio, cancels reminders, and
    /// announces completion. No further phase is emitted.
    fn handle_complete(&mut self, now: Instant) {
        info!("session complete");
        self.state.complete(now);
        self.reminder.cancel();
        self.sink.set_audio_playing(false);
        self.sink.render_progress(1.0);
        self.sink
            .render_phase(Phase::Complete, Phase::Complete.label());
        if let Some(cue) = Phase::Complete.spoken_cue() {
            self.sink.play_cue(cue);
        }
        self.sink.set_controls_enabled(true, false);
    }

    /// Returns the current session phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Returns elapsed session time as of `now`.
    pub fn elapsed(&self, now: Instant) -> std::time::Duration {
        self.state.elapsed(now)
    }

    /// Returns the completion fraction as of `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        ProgressTracker::fraction(self.state.elapsed(now), self.config.total)
    }

    /// Returns true if the session is actively running.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Returns true if the session has completed.
    pub fn is_complete(&self) -> bool {
        self.state.phase == Phase::Complete
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns a reference to the sink, for presentation-side queries.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

// ============================================================================
// Tests
// ============================================================================
