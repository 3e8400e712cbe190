//! Runtime error types for the sound engine.
//!
//! Neither type escapes the engine's event entry points: playback and
//! persistence failures are logged and swallowed so a sound problem never
//! stops game text from rendering. Only `ConfigError` reaches callers, from
//! `SoundEngine::init`.

use std::path::PathBuf;

use thiserror::Error;

pub use ifhub_sound_config::ConfigError;

/// A clip could not be played.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The resolved clip path does not exist.
    #[error("Sound file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The clip file exists but could not be opened.
    #[error("Failed to open sound file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No audio output device could be opened.
    #[error("Failed to open audio output: {0}")]
    Output(String),

    /// The clip could not be decoded.
    #[error("Failed to decode sound file '{}': {message}", .path.display())]
    Decode { path: PathBuf, message: String },
}

/// The mute flag could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The state file could not be read or written.
    #[error("State file I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but is not a valid key/value document.
    #[error("State file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The state could not be serialized.
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_yaml_ng::Error),

    /// The backend refused the operation.
    #[error("Persistence backend unavailable: {0}")]
    Unavailable(String),
}
