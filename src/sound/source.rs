//! Ambient sound selection and file resolution.
//!
//! Named sounds resolve against the user's sounds directory
//! (`~/.breathe/sounds` by default, overridable with `BREATHE_SOUNDS_DIR`),
//! trying the supported audio extensions in order.

use std::path::PathBuf;

use super::error::SoundError;

/// File extensions tried when resolving a named sound.
const EXTENSIONS: &[&str] = &["mp3", "ogg", "wav", "flac"];

/// Name of the default ambient sound.
pub const DEFAULT_SOUND: &str = "waves";

// ============================================================================
// AmbientSound
// ============================================================================

/// The ambient sound selected for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbientSound {
    /// No ambient sound.
    None,
    /// A named sound resolved from the sounds directory.
    Named(String),
}

impl AmbientSound {
    /// Parses a CLI selection: `"none"` disables ambient sound.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("none") {
            Self::None
        } else {
            Self::Named(value.to_string())
        }
    }

    /// Resolves the sound to a file path, if one is selected.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::UnknownSound` if no file with a supported
    /// extension exists for the name.
    pub fn resolve(&self) -> Result<Option<PathBuf>, SoundError> {
        match self {
            Self::None => Ok(None),
            Self::Named(name) => {
                let dir = sounds_dir();
                for extension in EXTENSIONS {
                    let candidate = dir.join(format!("{}.{}", name, extension));
                    if candidate.is_file() {
                        return Ok(Some(candidate));
                    }
                }
                Err(SoundError::UnknownSound(name.clone()))
            }
        }
    }
}

impl Default for AmbientSound {
    fn default() -> Self {
        Self::Named(DEFAULT_SOUND.to_string())
    }
}

/// Returns the directory searched for ambient sound files.
pub fn sounds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BREATHE_SOUNDS_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".breathe")
        .join("sounds")
}

/// Lists the sound names resolvable in the sounds directory, sorted.
pub fn discover_sounds() -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(sounds_dir())
        .into_iter()
        .flatten()
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            let extension = path.extension()?.to_str()?.to_ascii_lowercase();
            if !EXTENSIONS.contains(&extension.as_str()) {
                return None;
            }
            Some(path.file_stem()?.to_str()?.to_string())
        })
        .collect();
    names.sort();
    names.dedup();
    names
}

// ============================================================================
// Tests
// ============================================================================
