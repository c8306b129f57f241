//! Notification sink interface between the session core and presentation.
//!
//! The core calls into the sink; the sink never drives core state. Sink
//! methods are infallible from the core's viewpoint: implementations that
//! hit a host failure (audio refused, broken pipe) log and carry on, and
//! the session timing logic proceeds identically either way.

use std::sync::{Arc, Mutex};

use crate::types::Phase;

// ============================================================================
// NotificationSink
// ============================================================================

/// Presentation collaborator invoked by the session core.
///
/// Implemented by the terminal renderer in this crate and by
/// [`MockNotificationSink`] for tests.
pub trait NotificationSink {
    /// Updates the visual state for a session phase.
    fn render_phase(&mut self, phase: Phase, label: &str);

    /// Updates the progress indicator with a completion fraction in `0..=1`.
    fn render_progress(&mut self, fraction: f64);

    /// Announces a voice cue. The sink decides whether voice is enabled.
    fn play_cue(&mut self, phrase: &str);

    /// Starts, resumes, or pauses ambient sound.
    fn set_audio_playing(&mut self, playing: bool);

    /// First reminder stage: a gentle pulse.
    fn show_reminder_pulse(&mut self);

    /// Escalated reminder stage: a full-screen overlay.
    fn show_reminder_overlay(&mut self);

    /// Clears the reminder overlay and pulse.
    fn hide_reminder_overlay(&mut self);

    /// Reflects session state on the start/pause controls.
    fn set_controls_enabled(&mut self, start_enabled: bool, pause_enabled: bool);
}

// ============================================================================
// SinkEvent
// ============================================================================

/// A recorded sink invocation, for inspection in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// `render_phase` call
    Phase {
        /// Phase rendered
        phase: Phase,
        /// Display label
        label: String,
    },
    /// `render_progress` call
    Progress {
        /// Completion fraction
        fraction: f64,
    },
    /// `play_cue` call
    Cue {
        /// Spoken phrase
        phrase: String,
    },
    /// `set_audio_playing` call
    Audio {
        /// Requested playback state
        playing: bool,
    },
    /// `show_reminder_pulse` call
    ReminderPulse,
    /// `show_reminder_overlay` call
    ReminderOverlay,
    /// `hide_reminder_overlay` call
    OverlayHidden,
    /// `set_controls_enabled` call
    Controls {
        /// Start control enabled
        start_enabled: bool,
        /// Pause control enabled
        pause_enabled: bool,
    },
}

// ============================================================================
// MockNotificationSink
// ============================================================================

/// A sink that records every call for later inspection.
///
/// The event log is shared: clone the handle returned by
/// [`MockNotificationSink::events`] before handing the sink to a
/// controller, then assert on the log afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl MockNotificationSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the recorded event log.
    pub fn events(&self) -> Arc<Mutex<Vec<SinkEvent>>> {
        Arc::clone(&self.events)
    }

    /// Returns a snapshot of the recorded events.
    pub fn recorded(&self) -> Vec<SinkEvent> {
        self.events.lock().expect("sink log poisoned").clone()
    }

    /// Clears the recorded events.
    pub fn clear(&self) {
        self.events.lock().expect("sink log poisoned").clear();
    }

    fn record(&self, event: SinkEvent) {
        self.events.lock().expect("sink log poisoned").push(event);
    }
}

impl NotificationSink for MockNotificationSink {
    fn render_phase(&mut self, phase: Phase, label: &str) {
        self.record(SinkEvent::Phase {
            phase,
            label: label.to_string(),
        });
    }

    fn render_progress(&mut self, fraction: f64) {
        self.record(SinkEvent::Progress { fraction });
    }

    fn play_cue(&mut self, phrase: &str) {
        self.record(SinkEvent::Cue {
            phrase: phrase.to_string(),
        });
    }

    fn set_audio_playing(&mut self, playing: bool) {
        self.record(SinkEvent::Audio { playing });
    }

    fn show_reminder_pulse(&mut self) {
        self.record(SinkEvent::ReminderPulse);
    }

    fn show_reminder_overlay(&mut self) {
        self.record(SinkEvent::ReminderOverlay);
    }

    fn hide_reminder_overlay(&mut self) {
        self.record(SinkEvent::OverlayHidden);
    }

    fn set_controls_enabled(&mut self, start_enabled: bool, pause_enabled: bool) {
        self.record(SinkEvent::Controls {
            start_enabled,
            pause_enabled,
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
