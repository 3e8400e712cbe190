//! Typed error variants for the ifhub-sound-config crate.
//!
//! Every variant is a load-time failure. A configuration that produces one of
//! these must be rejected as a whole; the engine never runs on a partially
//! loaded table.

use thiserror::Error;

use crate::sound::TriggerTable;

/// Errors that can occur when loading, saving, or validating a sound config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading sound config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML.
    #[error("YAML parse error in sound config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The config file contained invalid JSON.
    #[error("JSON parse error in sound config: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file contained invalid TOML.
    #[error("TOML parse error in sound config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("TOML serialize error for sound config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported sound config format: '{0}' (expected yaml, yml, json or toml)")]
    UnsupportedFormat(String),

    /// `storage_key` is empty or whitespace.
    #[error("Sound config storage_key must not be empty")]
    EmptyStorageKey,

    /// A trigger has an empty id.
    #[error("A {table} trigger has an empty id")]
    EmptyId { table: TriggerTable },

    /// Two triggers in the same table share an id.
    #[error("Duplicate {table} trigger id '{id}'")]
    DuplicateId { table: TriggerTable, id: String },

    /// A text trigger pattern failed to compile.
    #[error("Invalid pattern for text trigger '{id}': {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    /// A volume is not a finite value in `0.0..=1.0`.
    #[error("Volume {volume} for {table} trigger '{id}' is outside 0.0..=1.0")]
    VolumeOutOfRange {
        table: TriggerTable,
        id: String,
        volume: f32,
    },
}
