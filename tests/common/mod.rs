//! Shared integration test helpers for ifhub-sound.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{RecordingPlayer, engine_with};
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use ifhub_sound::{
    ClipPlayer, ManualClock, MemoryBackend, PersistenceBackend, PlaybackError, SoundConfig,
    SoundEngine,
};
use parking_lot::Mutex;

/// One `play` request seen by [`RecordingPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub path: String,
    pub volume: f32,
}

/// Player that records requests instead of producing sound. Clones share
/// the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    plays: Arc<Mutex<Vec<PlayRequest>>>,
}

impl RecordingPlayer {
    pub fn plays(&self) -> Vec<PlayRequest> {
        self.plays.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.plays.lock().len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.plays.lock().iter().map(|p| p.path.clone()).collect()
    }
}

impl ClipPlayer for RecordingPlayer {
    fn play(&self, path: &str, volume: f32) -> Result<(), PlaybackError> {
        self.plays.lock().push(PlayRequest {
            path: path.to_string(),
            volume,
        });
        Ok(())
    }
}

/// Test fixture: an initialised engine plus handles to observe it.
pub struct Harness {
    pub engine: SoundEngine,
    pub player: RecordingPlayer,
    pub clock: ManualClock,
}

/// Build an engine over `backend`, starting the clock at 0, and init it.
pub fn engine_with(config: &SoundConfig, backend: Arc<dyn PersistenceBackend>) -> Harness {
    let player = RecordingPlayer::default();
    let clock = ManualClock::new(0);
    let mut engine = SoundEngine::new(Box::new(player.clone()), backend)
        .with_clock(Box::new(clock.clone()));
    engine.init(config).expect("config should load");
    Harness {
        engine,
        player,
        clock,
    }
}

/// Same as [`engine_with`] over a fresh in-memory backend.
pub fn engine_for(config: &SoundConfig) -> Harness {
    engine_with(config, Arc::new(MemoryBackend::new()))
}

/// Parse an inline YAML config.
pub fn yaml_config(yaml: &str) -> SoundConfig {
    SoundConfig::parse(yaml, ifhub_sound::ConfigFormat::Yaml).expect("valid yaml config")
}
