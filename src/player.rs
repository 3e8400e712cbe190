//! Clip playback backends.
//!
//! Playback is fire-and-forget: `play` returns as soon as the clip has been
//! handed off, no handle is kept, and overlapping clips live independently.
//! Nothing here ever stops a clip that has started.

use std::path::{Path, PathBuf};

use crate::error::PlaybackError;

/// Audio backend seam used by the engine.
pub trait ClipPlayer: Send {
    /// Begin playing `path` at linear gain `volume` (0.0..=1.0) and return
    /// immediately. Errors detected before hand-off are returned; later
    /// failures are reported by the backend itself.
    fn play(&self, path: &str, volume: f32) -> Result<(), PlaybackError>;
}

/// Player that discards every request. Used when the `audio` feature is off
/// or the host has no output device.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayer;

impl ClipPlayer for NullPlayer {
    fn play(&self, path: &str, volume: f32) -> Result<(), PlaybackError> {
        log::debug!("Audio disabled, skipping '{}' at volume {:.2}", path, volume);
        Ok(())
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Resolve a configured clip path. Absolute and `~/` paths are used as-is;
/// anything else is relative to `asset_root`.
pub fn resolve_clip_path(asset_root: &Path, path: &str) -> PathBuf {
    let candidate = expand_tilde(path);
    if candidate.is_absolute() {
        candidate
    } else {
        asset_root.join(candidate)
    }
}

/// Plays clips through the default output device with `rodio`.
///
/// Each clip gets its own thread and output sink, which is dropped when the
/// clip finishes.
#[cfg(feature = "audio")]
#[derive(Debug, Clone)]
pub struct RodioPlayer {
    asset_root: PathBuf,
}

#[cfg(feature = "audio")]
impl RodioPlayer {
    /// Create a player resolving relative clip paths against `asset_root`
    /// (typically the game directory holding `audio/sfx/...`).
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    fn play_blocking(path: &Path, volume: f32) -> Result<(), PlaybackError> {
        use std::io::BufReader;

        let file = std::fs::File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let stream = rodio::DeviceSinkBuilder::open_default_sink()
            .map_err(|e| PlaybackError::Output(e.to_string()))?;
        let sink = rodio::Player::connect_new(stream.mixer());
        let source =
            rodio::Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        sink.set_volume(volume);
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(feature = "audio")]
impl ClipPlayer for RodioPlayer {
    fn play(&self, path: &str, volume: f32) -> Result<(), PlaybackError> {
        let path = resolve_clip_path(&self.asset_root, path);
        if !path.exists() {
            return Err(PlaybackError::NotFound { path });
        }

        let volume = volume.clamp(0.0, 1.0);
        std::thread::spawn(move || {
            if let Err(e) = Self::play_blocking(&path, volume) {
                log::error!("{}", e);
            }
        });
        Ok(())
    }
}
