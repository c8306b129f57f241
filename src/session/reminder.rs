//! Break reminder scheduling with staged escalation.
//!
//! Runs only while the session is running, independently of phase cycling.
//! A reminder is armed as a single deadline at `reminder_interval` from the
//! arming instant, not as a coarse recurring poll, so it fires at interval
//! precision. An unacknowledged reminder escalates: overlay after three
//! minutes, automatic pause after five, both measured from the fire instant.
//!
//! Deadlines are plain owned instants evaluated on the driver tick; there
//! are no detached timer tasks, so `cancel()` clears everything
//! synchronously and a cancelled reminder can never fire late.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// Delay from reminder fire to full-screen overlay escalation.
pub const OVERLAY_ESCALATION: Duration = Duration::from_secs(3 * 60);

/// Delay from reminder fire to automatic session pause.
pub const AUTO_PAUSE_ESCALATION: Duration = Duration::from_secs(5 * 60);

// ============================================================================
// ReminderPhase
// ============================================================================

/// Lifecycle state of the reminder scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPhase {
    /// Not running (session idle, paused, or complete)
    Inactive,
    /// Waiting for the next fire deadline
    ArmedWaitingInterval,
    /// Fired and awaiting acknowledgment; escalation deadlines armed
    Fired,
    /// Overlay shown; auto-pause deadline still armed
    EscalatedOverlay,
}

// ============================================================================
// ReminderAction
// ============================================================================

/// An action the controller must take on behalf of the reminder scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    /// Show the pulse and speak the break reminder.
    Fire,
    /// Show the full-screen overlay.
    ShowOverlay,
    /// Pause the session on the user's behalf.
    AutoPause,
}

// ============================================================================
// ReminderScheduler
// ============================================================================

/// Deadline state machine for break reminders.
#[derive(Debug)]
pub struct ReminderScheduler {
    interval: Duration,
    phase: ReminderPhase,
    next_fire_at: Option<Instant>,
    overlay_at: Option<Instant>,
    auto_pause_at: Option<Instant>,
}

impl ReminderScheduler {
    /// Creates an inactive scheduler with the given reminder interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: ReminderPhase::Inactive,
            next_fire_at: None,
            overlay_at: None,
            auto_pause_at: None,
        }
    }

    /// Returns the current lifecycle state.
    pub fn phase(&self) -> ReminderPhase {
        self.phase
    }

    /// Returns true if any deadline is pending.
    pub fn has_pending_deadlines(&self) -> bool {
        self.next_fire_at.is_some() || self.overlay_at.is_some() || self.auto_pause_at.is_some()
    }

    /// Arms the first fire at `interval` from `now`.
    pub fn begin(&mut self, now: Instant) {
        self.phase = ReminderPhase::ArmedWaitingInterval;
        self.next_fire_at = Some(now + self.interval);
        self.overlay_at = None;
        self.auto_pause_at = None;
        debug!(interval_secs = self.interval.as_secs(), "reminder armed");
    }

    /// Clears every pending deadline.
    ///
    /// Invoked on pause, reset, and completion; afterwards no previously
    /// scheduled deadline can produce an action.
    pub fn cancel(&mut self) {
        self.phase = ReminderPhase::Inactive;
        self.next_fire_at = None;
        self.overlay_at = None;
        self.auto_pause_at = None;
    }

    /// Acknowledges a fired reminder.
    ///
    /// Cancels both escalation deadlines and re-arms the next fire a full
    /// interval from the acknowledgment instant, so reminder spacing tracks
    /// user responsiveness rather than the original fire time.
    pub fn acknowledge(&mut self, now: Instant) {
        match self.phase {
            ReminderPhase::Fired | ReminderPhase::EscalatedOverlay => {
                self.phase = ReminderPhase::ArmedWaitingInterval;
                self.next_fire_at = Some(now + self.interval);
                self.overlay_at = None;
                self.auto_pause_at = None;
                debug!("reminder acknowledged, re-armed");
            }
            _ => {}
        }
    }

    /// Evaluates deadlines as of `now`, returning actions in firing order.
    ///
    /// `visible` is consulted at fire time only: a fire while the host UI
    /// is hidden is suppressed and re-armed a full interval out, with no
    /// escalation. Escalation deadlines, once armed, are unaffected by
    /// visibility.
    pub fn poll(&mut self, now: Instant, visible: bool) -> Vec<ReminderAction> {
        let mut actions = Vec::new();

        if self.phase == ReminderPhase::ArmedWaitingInterval {
            if let Some(fire_at) = self.next_fire_at {
                if now >= fire_at {
                    self.next_fire_at = None;
                    if visible {
                        self.phase = ReminderPhase::Fired;
                        // Escalations are measured from the fire instant.
                        self.overlay_at = Some(fire_at + OVERLAY_ESCALATION);
                        self.auto_pause_at = Some(fire_at + AUTO_PAUSE_ESCALATION);
                        actions.push(ReminderAction::Fire);
                    } else {
                        self.next_fire_at = Some(now + self.interval);
                        debug!("reminder fire suppressed, host not visible");
                    }
                }
            }
        }

        if self.phase == ReminderPhase::Fired {
            if let Some(overlay_at) = self.overlay_at {
                if now >= overlay_at {
                    self.overlay_at = None;
                    self.phase = ReminderPhase::EscalatedOverlay;
                    actions.push(ReminderAction::ShowOverlay);
                }
            }
        }

        if matches!(
            self.phase,
            ReminderPhase::Fired | ReminderPhase::EscalatedOverlay
        ) {
            if let Some(auto_pause_at) = self.auto_pause_at {
                if now >= auto_pause_at {
                    self.auto_pause_at = None;
                    actions.push(ReminderAction::AutoPause);
                }
            }
        }

        actions
    }
}

// ============================================================================
// Tests
// ============================================================================
