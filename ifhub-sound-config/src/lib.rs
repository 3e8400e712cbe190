//! Sound trigger configuration for ifhub game front-ends.
//!
//! This crate provides the schema the sound engine is initialised from:
//!
//! - `SoundConfig` with its style (`sfx`) and text trigger tables
//! - Load-time validation with typed `ConfigError`s
//! - YAML / JSON / TOML loading and atomic saving
//! - Bundled configurations for the shipped games
//! - Config file watching for hot reload

pub mod defaults;
pub mod error;
pub mod persistence;
pub mod presets;
pub mod sound;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use error::ConfigError;
pub use persistence::{ConfigFormat, config_dir, state_file_path};
pub use presets::Preset;
pub use sound::{
    SfxConfig, SfxMap, SoundConfig, TextTriggerConfig, TriggerTable, check_volume,
    compile_pattern,
};
#[cfg(feature = "watcher")]
pub use watcher::{ConfigReloadEvent, ConfigWatcher};
