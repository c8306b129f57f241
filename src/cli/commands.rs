//! Command definitions for the breathe CLI.
//!
//! Uses clap derive macro for argument parsing. User-facing range limits
//! (session minutes, reminder minutes, phase seconds) are enforced here,
//! at the settings boundary; an out-of-range value is rejected before any
//! session state exists.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::sound::DEFAULT_SOUND;
use crate::types::SessionConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Breathe - a guided breathing-exercise timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "breathe",
    version,
    about = "Guided breathing exercises in your terminal",
    long_about = "A guided breathing-exercise timer. Cycles through inhale, hold,\n\
                  and exhale phases with voice cues and optional ambient sound,\n\
                  and reminds you to take breaks during long stretches.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a breathing session
    Start(StartArgs),

    /// List ambient sounds available on this machine
    Sounds,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Start Command Arguments
// ============================================================================

/// Arguments for the start command
#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Session duration in minutes (1-30)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub minutes: u32,

    /// Break reminder interval in minutes (30-180)
    #[arg(
        short,
        long,
        default_value = "120",
        value_parser = clap::value_parser!(u32).range(30..=180)
    )]
    pub reminder_interval: u32,

    /// Inhale duration in seconds (1-60)
    #[arg(
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub inhale: u32,

    /// Hold duration in seconds (1-60)
    #[arg(
        long,
        default_value = "7",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub hold: u32,

    /// Exhale duration in seconds (1-60)
    #[arg(
        long,
        default_value = "8",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub exhale: u32,

    /// Disable voice cues
    #[arg(long)]
    pub no_voice: bool,

    /// Ambient sound name, or "none" to disable
    #[arg(short, long, default_value = DEFAULT_SOUND)]
    pub sound: String,

    /// Emit session events as JSON lines instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl Default for StartArgs {
    fn default() -> Self {
        Self {
            minutes: 5,
            reminder_interval: 120,
            inhale: 4,
            hold: 7,
            exhale: 8,
            no_voice: false,
            sound: DEFAULT_SOUND.to_string(),
            json: false,
        }
    }
}

impl StartArgs {
    /// Builds the session configuration from the parsed arguments.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_inhale(Duration::from_secs(u64::from(self.inhale)))
            .with_hold(Duration::from_secs(u64::from(self.hold)))
            .with_exhale(Duration::from_secs(u64::from(self.exhale)))
            .with_total(Duration::from_secs(u64::from(self.minutes) * 60))
            .with_reminder_interval(Duration::from_secs(u64::from(self.reminder_interval) * 60))
    }
}

// ============================================================================
// Tests
// ============================================================================
