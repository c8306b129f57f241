//! Ambient sound playback for breathing sessions.
//!
//! This module provides the looping background audio that accompanies a
//! session:
//!
//! - Named sound resolution from the user's sounds directory
//! - Looping playback with position-preserving pause/resume
//! - Graceful degradation to silence when audio is unavailable
//!
//! Sound files live in `~/.breathe/sounds` (override with the
//! `BREATHE_SOUNDS_DIR` environment variable); any of `mp3`, `ogg`,
//! `wav`, or `flac` works. Selecting the sound "none" disables audio.

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_player, AmbientPlayer};
pub use source::{discover_sounds, sounds_dir, AmbientSound, DEFAULT_SOUND};
