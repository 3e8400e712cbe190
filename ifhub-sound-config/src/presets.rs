//! Sound configurations bundled for the games shipped with ifhub.

use crate::error::ConfigError;
use crate::persistence::ConfigFormat;
use crate::sound::SoundConfig;

const FEVERDREAM_YAML: &str = include_str!("../games/feverdream.yaml");
const ZORK1_YAML: &str = include_str!("../games/zork1.yaml");

/// A bundled game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Fever Dream: one style-marker cue, no text triggers.
    FeverDream,
    /// Zork I: text triggers only.
    Zork1,
}

impl Preset {
    /// All bundled presets.
    pub fn all() -> &'static [Preset] {
        &[Preset::FeverDream, Preset::Zork1]
    }

    /// Short name used to select a preset, e.g. from a game manifest.
    pub fn name(self) -> &'static str {
        match self {
            Preset::FeverDream => "feverdream",
            Preset::Zork1 => "zork1",
        }
    }

    /// Look up a preset by its short name.
    pub fn from_name(name: &str) -> Option<Preset> {
        Self::all().iter().copied().find(|p| p.name() == name)
    }

    /// Raw YAML source of the preset.
    pub fn source(self) -> &'static str {
        match self {
            Preset::FeverDream => FEVERDREAM_YAML,
            Preset::Zork1 => ZORK1_YAML,
        }
    }

    /// Parse and validate the preset.
    pub fn load(self) -> Result<SoundConfig, ConfigError> {
        let config = SoundConfig::parse(self.source(), ConfigFormat::Yaml)?;
        config.validate()?;
        Ok(config)
    }
}

/// Fever Dream sound configuration.
pub fn feverdream() -> Result<SoundConfig, ConfigError> {
    Preset::FeverDream.load()
}

/// Zork I sound configuration.
pub fn zork1() -> Result<SoundConfig, ConfigError> {
    Preset::Zork1.load()
}
