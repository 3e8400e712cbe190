//! Sound config file I/O and path resolution.
//!
//! Covers:
//! - `load_from_path` / `save_to_path` (YAML, JSON or TOML chosen by extension,
//!   with atomic write on save)
//! - XDG-style path helpers (`config_dir`, `state_file_path`)

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::sound::SoundConfig;

/// Application directory name shared by config and state paths.
const APP_DIR: &str = "ifhub-sound";

/// On-disk encodings a sound config can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl SoundConfig {
    /// Parse a config from a string in the given format. Does not validate.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml_ng::from_str(contents)?,
            ConfigFormat::Json => serde_json::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        };
        Ok(config)
    }

    /// Render the config in the given format.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        let text = match format {
            ConfigFormat::Yaml => serde_yaml_ng::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string(self)?,
        };
        Ok(text)
    }

    /// Read and parse a config file without validating it.
    pub fn read_from_path(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        log::info!("Loading sound config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, format)
    }

    /// Load and validate a config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_from_path(path)?;
        config.validate()?;
        log::debug!(
            "Sound config '{}' loaded: {} style triggers, {} text triggers",
            config.storage_key,
            config.sfx.len(),
            config.text_triggers.len()
        );
        Ok(config)
    }

    /// Save the config to a file, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let text = self.render(format)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension(format!("{}.tmp", format.extension()));
        fs::write(&temp_path, &text)?;
        fs::rename(&temp_path, path)?;

        log::debug!("Saved sound config to {:?}", path);
        Ok(())
    }
}

/// Get the configuration directory path (XDG convention).
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join(APP_DIR)
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join(APP_DIR)
        } else {
            PathBuf::from(".")
        }
    }
}

/// Get the state file path used to persist runtime flags such as mute.
pub fn state_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(data_dir) = dirs::data_local_dir() {
            data_dir.join(APP_DIR).join("state.yaml")
        } else {
            PathBuf::from("state.yaml")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir
                .join(".local")
                .join("share")
                .join(APP_DIR)
                .join("state.yaml")
        } else {
            PathBuf::from("state.yaml")
        }
    }
}
