//! Sound system error types.
//!
//! All errors here are non-fatal: ambient sound degrades to silence and
//! the session timing logic proceeds identically.

use thiserror::Error;

/// Errors that can occur in the ambient sound system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no output device connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// No sound file for the requested name exists in the sounds directory.
    #[error("no sound named '{0}' found in the sounds directory")]
    UnknownSound(String),

    /// Sound file was not found or could not be opened.
    #[error("sound file could not be opened: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("sound file could not be decoded: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("audio stream could not be created: {0}")]
    StreamError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the sound file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownSound(_) | Self::FileNotFound(_) | Self::DecodeError(_)
        )
    }
}
