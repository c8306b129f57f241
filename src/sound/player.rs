//! Ambient sound playback using rodio.
//!
//! Unlike a one-shot notification chime, the ambient track loops for the
//! whole session and must survive pause/resume with its position intact:
//! `pause` keeps the playback position, `play` resumes in place, and
//! `rewind` restarts the track from the beginning for a fresh session.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::AmbientSound;

/// Ambient playback volume, kept at half so voice cues stay audible.
const AMBIENT_VOLUME: f32 = 0.5;

// ============================================================================
// AmbientPlayer
// ============================================================================

/// Looping ambient sound player for a session.
///
/// Created paused; call [`AmbientPlayer::play`] to start.
pub struct AmbientPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream, needed to rebuild the sink on rewind.
    stream_handle: OutputStreamHandle,
    /// The playback sink carrying the looping track.
    sink: Sink,
    /// Path of the loaded sound file.
    path: PathBuf,
}

impl AmbientPlayer {
    /// Creates a player with the sound file loaded, looping, and paused.
    ///
    /// # Errors
    ///
    /// Returns a [`SoundError`] if no audio device is available or the
    /// file cannot be opened or decoded.
    pub fn new(path: PathBuf) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        let sink = Self::build_sink(&stream_handle, &path)?;
        debug!(path = %path.display(), "ambient sound loaded");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink,
            path,
        })
    }

    /// Builds a paused sink with the looping track appended.
    fn build_sink(stream_handle: &OutputStreamHandle, path: &PathBuf) -> Result<Sink, SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.set_volume(AMBIENT_VOLUME);
        sink.pause();
        sink.append(decoder.repeat_infinite());
        Ok(sink)
    }

    /// Starts or resumes playback at the current position.
    pub fn play(&self) {
        self.sink.play();
    }

    /// Pauses playback, keeping the position for resume.
    pub fn pause(&self) {
        self.sink.pause();
    }

    /// Restarts the track from the beginning, paused.
    ///
    /// Used when a session is reset or completed so that the next fresh
    /// start plays from position zero.
    pub fn rewind(&mut self) -> Result<(), SoundError> {
        self.sink.stop();
        self.sink = Self::build_sink(&self.stream_handle, &self.path)?;
        Ok(())
    }

    /// Returns true if playback is currently paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }
}

impl std::fmt::Debug for AmbientPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmbientPlayer")
            .field("path", &self.path)
            .field("paused", &self.sink.is_paused())
            .finish_non_exhaustive()
    }
}

/// Creates an ambient player for the selection, or None when sound is off
/// or unavailable.
///
/// Resolution and device failures are logged and degrade to silence; the
/// session proceeds identically without audio.
#[must_use]
pub fn try_create_player(sound: &AmbientSound) -> Option<AmbientPlayer> {
    let path = match sound.resolve() {
        Ok(Some(path)) => path,
        Ok(None) => return None,
        Err(e) => {
            warn!("ambient sound unavailable: {}", e);
            return None;
        }
    };

    match AmbientPlayer::new(path) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("audio not available, ambient sound disabled: {}", e);
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
