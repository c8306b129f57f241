//! Session engine for the breathing timer.
//!
//! This module contains the core timing coordination:
//! - `controller`: Top-level state machine (idle/running/paused/complete)
//! - `phase`: Breathing phase derivation from elapsed time
//! - `progress`: Completion fraction derivation
//! - `reminder`: Break reminder scheduling with staged escalation

pub mod controller;
pub mod phase;
pub mod progress;
pub mod reminder;

pub use controller::{SessionController, REMINDER_PHRASE};
pub use phase::{PhaseScheduler, PhaseTransition};
pub use progress::ProgressTracker;
pub use reminder::{
    ReminderAction, ReminderPhase, ReminderScheduler, AUTO_PAUSE_ESCALATION, OVERLAY_ESCALATION,
};
