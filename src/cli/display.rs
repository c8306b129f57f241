//! Terminal output for breathing sessions.
//!
//! This module provides:
//! - [`TerminalSink`], the [`NotificationSink`] the interactive session
//!   renders through (plain text or JSON lines)
//! - [`Display`], formatted output for non-session commands
//!
//! Sink methods never fail from the session's viewpoint: a broken audio
//! device is logged and the session proceeds silently.

use serde::Serialize;
use tracing::warn;

use crate::notify::NotificationSink;
use crate::sound::AmbientPlayer;
use crate::types::Phase;

// ============================================================================
// TerminalSink
// ============================================================================

/// Renders session events to stdout and drives the ambient player.
///
/// In plain mode, phase changes and reminders print as short lines and
/// progress prints at 10% steps. In JSON mode every event prints as one
/// JSON object per line, suitable for piping into another program.
pub struct TerminalSink {
    /// Whether voice cue phrases are printed.
    voice_enabled: bool,
    /// Whether output is JSON lines instead of plain text.
    json: bool,
    /// The ambient sound player, if audio is available.
    player: Option<AmbientPlayer>,
    /// Last progress percent printed, to dedupe updates.
    last_percent: Option<u8>,
    /// Whether a reminder (pulse or overlay) is currently showing.
    reminder_visible: bool,
}

/// One JSON-mode output line.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Phase { phase: &'a str, label: &'a str },
    Progress { percent: u8 },
    Cue { phrase: &'a str },
    Audio { playing: bool },
    ReminderPulse,
    ReminderOverlay,
    ReminderDismissed,
    Controls { start: bool, pause: bool },
}

impl TerminalSink {
    /// Creates a sink with the given output mode and optional player.
    pub fn new(voice_enabled: bool, json: bool, player: Option<AmbientPlayer>) -> Self {
        Self {
            voice_enabled,
            json,
            player,
            last_percent: None,
            reminder_visible: false,
        }
    }

    fn emit_json(&self, event: &JsonEvent<'_>) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("failed to serialize event: {}", e),
        }
    }

    /// Rewinds the ambient track so the next start plays from the top.
    fn rewind_audio(&mut self) {
        if let Some(player) = &mut self.player {
            if let Err(e) = player.rewind() {
                warn!("could not rewind ambient sound: {}", e);
            }
        }
    }
}

impl NotificationSink for TerminalSink {
    fn render_phase(&mut self, phase: Phase, label: &str) {
        if self.json {
            self.emit_json(&JsonEvent::Phase {
                phase: phase.as_str(),
                label,
            });
        } else {
            let glyph = match phase {
                Phase::Inhale => ">>",
                Phase::Hold => "==",
                Phase::Exhale => "<<",
                Phase::Paused => "||",
                Phase::Complete => "**",
                Phase::Idle => "--",
            };
            println!("{} {}", glyph, label);
        }

        // A fresh-start or finished session leaves the track at the top.
        if matches!(phase, Phase::Idle | Phase::Complete) {
            self.rewind_audio();
            self.last_percent = None;
        }
    }

    fn render_progress(&mut self, fraction: f64) {
        let percent = (fraction * 100.0).round().clamp(0.0, 100.0) as u8;
        if self.last_percent == Some(percent) {
            return;
        }

        if self.json {
            self.last_percent = Some(percent);
            self.emit_json(&JsonEvent::Progress { percent });
        } else {
            // Plain mode prints at 10% steps to keep the scroll readable.
            let step_crossed = match self.last_percent {
                Some(last) => percent / 10 != last / 10,
                None => true,
            };
            self.last_percent = Some(percent);
            if step_crossed {
                println!("   {}%", percent);
            }
        }
    }

    fn play_cue(&mut self, phrase: &str) {
        if !self.voice_enabled {
            return;
        }
        if self.json {
            self.emit_json(&JsonEvent::Cue { phrase });
        } else {
            println!("   ({})", phrase);
        }
    }

    fn set_audio_playing(&mut self, playing: bool) {
        if let Some(player) = &self.player {
            if playing {
                player.play();
            } else {
                player.pause();
            }
        }
        if self.json {
            self.emit_json(&JsonEvent::Audio { playing });
        }
    }

    fn show_reminder_pulse(&mut self) {
        self.reminder_visible = true;
        if self.json {
            self.emit_json(&JsonEvent::ReminderPulse);
        } else {
            println!("(!) Time for a break - press 'a' to acknowledge");
        }
    }

    fn show_reminder_overlay(&mut self) {
        self.reminder_visible = true;
        if self.json {
            self.emit_json(&JsonEvent::ReminderOverlay);
        } else {
            println!("============================================");
            println!("(!!) You have been going for a while.");
            println!("     Take a break now, then press 'a'.");
            println!("============================================");
        }
    }

    fn hide_reminder_overlay(&mut self) {
        // Called on every reset too; only report an actual dismissal.
        if !self.reminder_visible {
            return;
        }
        self.reminder_visible = false;
        if self.json {
            self.emit_json(&JsonEvent::ReminderDismissed);
        } else {
            println!("    reminder dismissed");
        }
    }

    fn set_controls_enabled(&mut self, start_enabled: bool, pause_enabled: bool) {
        if self.json {
            self.emit_json(&JsonEvent::Controls {
                start: start_enabled,
                pause: pause_enabled,
            });
        }
        // Plain mode shows the key hints once in the session header instead.
    }
}

impl std::fmt::Debug for TerminalSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSink")
            .field("voice_enabled", &self.voice_enabled)
            .field("json", &self.json)
            .field("has_player", &self.player.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the session header with the configuration and key hints.
    pub fn show_session_header(minutes: u32, inhale: u32, hold: u32, exhale: u32) {
        println!("Breathing session: {} min", minutes);
        println!(
            "Cycle: inhale {}s / hold {}s / exhale {}s",
            inhale, hold, exhale
        );
        println!("Keys: [p]ause  [s]tart/resume  [a]cknowledge  [x]reset  [q]uit");
        println!("--------------------------------------------");
    }

    /// Shows the available ambient sounds.
    pub fn show_sounds(names: &[String], dir: &std::path::Path) {
        if names.is_empty() {
            println!("No ambient sounds found in {}", dir.display());
            println!("Drop mp3/ogg/wav/flac files there to use them with --sound.");
        } else {
            println!("Available ambient sounds ({}):", dir.display());
            for name in names {
                println!("  {}", name);
            }
        }
    }

    /// Shows a closing line when the session ends.
    pub fn show_goodbye(completed: bool) {
        if completed {
            println!("--------------------------------------------");
            println!("Session complete. Well done.");
        } else {
            println!("Session ended.");
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("x Error: {}", message);
    }

    /// Shows a hint for an unrecognized interactive command.
    pub fn show_unknown_command(input: &str) {
        println!(
            "?  unknown command '{}' (p, s, a, x, q)",
            input
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
