//! Sound trigger engine for interactive-fiction web front-ends.
//!
//! A game ships a [`SoundConfig`] declaring which clips play when:
//!
//! - **Style triggers** (`sfx`) are keyed to exact markers emitted by the
//!   story source and always play when fired.
//! - **Text triggers** are case-insensitive patterns matched against every
//!   chunk of rendered game output, each with its own cooldown.
//!
//! The interpreter feeds the engine through [`SoundEngine::on_text`] and
//! [`SoundEngine::fire_style`]. A persisted mute flag, scoped by the config's
//! `storage_key`, gates all playback.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ifhub_sound::{FileBackend, NullPlayer, SoundEngine, presets};
//!
//! # fn main() -> Result<(), ifhub_sound::ConfigError> {
//! let mut engine = SoundEngine::new(
//!     Box::new(NullPlayer),
//!     Arc::new(FileBackend::default_location()),
//! );
//! engine.init(&presets::zork1()?)?;
//! engine.on_text("In the distance you hear the chirping of a song bird.");
//! # Ok(())
//! # }
//! ```
//!
//! The library logs through the `log` facade and installs no logger.

pub mod clock;
pub mod cooldown;
pub mod engine;
pub mod error;
pub mod mute;
pub mod persistence;
pub mod player;
pub mod triggers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cooldown::CooldownRegistry;
pub use engine::SoundEngine;
pub use error::{ConfigError, PersistenceError, PlaybackError};
pub use mute::MuteStore;
pub use persistence::{FileBackend, MemoryBackend, PersistenceBackend};
#[cfg(feature = "audio")]
pub use player::RodioPlayer;
pub use player::{ClipPlayer, NullPlayer, resolve_clip_path};
pub use triggers::{StyleTrigger, StyleTriggerTable, TextTrigger, TextTriggerTable};

// Configuration schema re-exports
pub use ifhub_sound_config::{
    ConfigFormat, Preset, SfxConfig, SfxMap, SoundConfig, TextTriggerConfig, TriggerTable,
    presets,
};
#[cfg(feature = "watcher")]
pub use ifhub_sound_config::{ConfigReloadEvent, ConfigWatcher};
