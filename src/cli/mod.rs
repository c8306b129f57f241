//! CLI module for the breathe timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Terminal sink and output formatting
//! - `run`: The interactive foreground session loop

pub mod commands;
pub mod display;
pub mod run;

pub use commands::{Cli, Commands, StartArgs};
pub use display::{Display, TerminalSink};
pub use run::run_session;
