//! Breathe - a guided breathing-exercise timer for the terminal.
//!
//! This library provides the core functionality for the breathe CLI:
//! - Session engine driving the inhale/hold/exhale cycle
//! - Progress tracking against the session duration
//! - Break reminders with staged escalation (pulse, overlay, auto-pause)
//! - Notification sink interface between the core and presentation
//! - Ambient sound playback for sessions
//! - CLI command parsing and terminal display

pub mod cli;
pub mod notify;
pub mod session;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, Phase, SessionConfig, SessionState};

// Re-export the session engine
pub use session::{
    PhaseScheduler, ProgressTracker, ReminderAction, ReminderPhase, ReminderScheduler,
    SessionController,
};

// Re-export notification types
pub use notify::{MockNotificationSink, NotificationSink, SinkEvent};

// Re-export sound types
pub use sound::{try_create_player, AmbientPlayer, AmbientSound, SoundError};
