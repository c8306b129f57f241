//! Interactive foreground session loop.
//!
//! Drives the session controller from a 50ms ticker and reads single-letter
//! commands from stdin:
//!
//! - `p` pause
//! - `s` start / resume
//! - `a` acknowledge the break reminder
//! - `x` reset to idle
//! - `q` quit
//!
//! Ctrl-C ends the session like `q`. The loop exits on its own once the
//! session completes.

use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::notify::NotificationSink;
use crate::session::SessionController;
use crate::sound::{try_create_player, AmbientSound};

use super::commands::StartArgs;
use super::display::{Display, TerminalSink};

/// Driver tick period. Short enough that phase edges land within a frame
/// of their scheduled instant.
const TICK_PERIOD: Duration = Duration::from_millis(50);

/// What an interactive command asks the loop to do next.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs an interactive breathing session to completion or quit.
pub async fn run_session(args: &StartArgs) -> anyhow::Result<()> {
    let config = args.session_config();
    let sound = AmbientSound::parse(&args.sound);
    let player = try_create_player(&sound);
    let sink = TerminalSink::new(!args.no_voice, args.json, player);

    let mut controller =
        SessionController::new(config, sink).context("invalid session configuration")?;

    if !args.json {
        Display::show_session_header(args.minutes, args.inhale, args.hold, args.exhale);
    }

    let mut ticker = interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    controller.start(Instant::now());
    info!("session started");

    let completed = loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.tick(Instant::now());
                if controller.is_complete() {
                    break true;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(input)) => {
                        if handle_command(&mut controller, input.trim()) == Flow::Quit {
                            break false;
                        }
                    }
                    Ok(None) => {
                        // stdin closed (piped input exhausted); the ticker
                        // keeps the session running to completion.
                        debug!("stdin closed, continuing without commands");
                        stdin_open = false;
                    }
                    Err(e) => {
                        debug!("stdin read failed: {}", e);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break false;
            }
        }
    };

    // Leave the ambient track silent on the way out.
    controller.sink_mut().set_audio_playing(false);

    if !args.json {
        Display::show_goodbye(completed);
    }
    Ok(())
}

/// Applies one interactive command to the controller.
fn handle_command<S: NotificationSink>(
    controller: &mut SessionController<S>,
    input: &str,
) -> Flow {
    let now = Instant::now();
    match input {
        "" => {}
        "p" | "pause" => controller.pause(now),
        "s" | "start" | "resume" => controller.start(now),
        "a" | "ack" | "acknowledge" => controller.acknowledge_reminder(now),
        "x" | "reset" => controller.reset(now),
        "q" | "quit" | "exit" => return Flow::Quit,
        other => Display::show_unknown_command(other),
    }
    Flow::Continue
}

// ============================================================================
// Tests
// ============================================================================
