//! Exact-key style marker lookup.

use std::collections::HashMap;

use ifhub_sound_config::{ConfigError, SfxMap, TriggerTable, check_volume};

/// A clip bound to an authored style marker.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTrigger {
    pub id: String,
    pub clip_path: String,
    pub volume: f32,
}

/// Marker id -> clip. No pattern matching, no cooldown.
#[derive(Debug, Default, Clone)]
pub struct StyleTriggerTable {
    entries: HashMap<String, StyleTrigger>,
}

impl StyleTriggerTable {
    /// Build the table from the `sfx` mapping. Empty or duplicate ids and
    /// out-of-range volumes fail the whole build.
    pub fn from_config(sfx: &SfxMap) -> Result<Self, ConfigError> {
        let mut entries = HashMap::with_capacity(sfx.len());
        for (id, clip) in sfx.iter() {
            if id.trim().is_empty() {
                return Err(ConfigError::EmptyId {
                    table: TriggerTable::Style,
                });
            }
            check_volume(TriggerTable::Style, id, clip.volume)?;
            let trigger = StyleTrigger {
                id: id.to_string(),
                clip_path: clip.src.clone(),
                volume: clip.volume,
            };
            if entries.insert(id.to_string(), trigger).is_some() {
                return Err(ConfigError::DuplicateId {
                    table: TriggerTable::Style,
                    id: id.to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, id: &str) -> Option<&StyleTrigger> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
