//! Ordered, pattern-matched text triggers.

use std::collections::HashSet;

use ifhub_sound_config::{
    ConfigError, TextTriggerConfig, TriggerTable, check_volume, compile_pattern,
};
use regex::Regex;

/// A clip bound to a compiled, case-insensitive pattern.
#[derive(Debug, Clone)]
pub struct TextTrigger {
    pub id: String,
    pub pattern: Regex,
    pub clip_path: String,
    pub volume: f32,
    pub cooldown_ms: u64,
}

impl TextTrigger {
    /// Unanchored match against the whole chunk.
    pub fn is_match(&self, chunk: &str) -> bool {
        self.pattern.is_match(chunk)
    }
}

/// Text triggers in declaration order.
#[derive(Debug, Default, Clone)]
pub struct TextTriggerTable {
    triggers: Vec<TextTrigger>,
}

impl TextTriggerTable {
    /// Compile every trigger. Any bad pattern, empty or duplicate id, or
    /// out-of-range volume fails the whole build.
    pub fn from_config(configs: &[TextTriggerConfig]) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(configs.len());
        let mut triggers = Vec::with_capacity(configs.len());
        for config in configs {
            if config.id.trim().is_empty() {
                return Err(ConfigError::EmptyId {
                    table: TriggerTable::Text,
                });
            }
            if !seen.insert(config.id.as_str()) {
                return Err(ConfigError::DuplicateId {
                    table: TriggerTable::Text,
                    id: config.id.clone(),
                });
            }
            check_volume(TriggerTable::Text, &config.id, config.volume)?;
            triggers.push(TextTrigger {
                id: config.id.clone(),
                pattern: compile_pattern(&config.id, &config.pattern)?,
                clip_path: config.src.clone(),
                volume: config.volume,
                cooldown_ms: config.cooldown_ms,
            });
        }
        Ok(Self { triggers })
    }

    /// Every trigger whose pattern matches `chunk`, first-declared first.
    /// Matching does not stop at the first hit.
    pub fn match_all<'a>(&'a self, chunk: &'a str) -> impl Iterator<Item = &'a TextTrigger> + 'a {
        self.triggers.iter().filter(move |t| t.is_match(chunk))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextTrigger> {
        self.triggers.iter()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
