//! Configuration types for style triggers, text triggers, and their validation.

use std::collections::HashSet;
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Which trigger table an entry belongs to. Used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTable {
    /// Exact-key style markers (`sfx`).
    Style,
    /// Pattern-matched output text (`text_triggers`).
    Text,
}

impl fmt::Display for TriggerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerTable::Style => write!(f, "sfx"),
            TriggerTable::Text => write!(f, "text"),
        }
    }
}

/// Complete sound configuration for one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoundConfig {
    /// Persistence namespace for the mute flag.
    #[serde(alias = "storageKey")]
    pub storage_key: String,
    /// Style marker id -> clip.
    #[serde(default)]
    pub sfx: SfxMap,
    /// Pattern-matched triggers, evaluated in declaration order.
    #[serde(default, alias = "textTriggers")]
    pub text_triggers: Vec<TextTriggerConfig>,
}

/// A clip bound to a style marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SfxConfig {
    pub src: String,
    pub volume: f32,
}

/// A clip bound to a case-insensitive pattern over game output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextTriggerConfig {
    pub id: String,
    pub pattern: String,
    pub src: String,
    pub volume: f32,
    /// Minimum milliseconds between firings. 0 disables throttling.
    #[serde(default, alias = "cooldownMs")]
    pub cooldown_ms: u64,
}

/// Ordered `sfx` mapping.
///
/// Serialized as a plain map, but deserialized into a list of pairs so that
/// duplicate keys in the source survive parsing and are caught by
/// [`SoundConfig::validate`] instead of being silently collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SfxMap(Vec<(String, SfxConfig)>);

impl SfxMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are kept and rejected at validation time.
    pub fn insert(&mut self, id: impl Into<String>, sfx: SfxConfig) {
        self.0.push((id.into(), sfx));
    }

    pub fn get(&self, id: &str) -> Option<&SfxConfig> {
        self.0.iter().find(|(key, _)| key == id).map(|(_, sfx)| sfx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SfxConfig)> {
        self.0.iter().map(|(id, sfx)| (id.as_str(), sfx))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SfxConfig)> for SfxMap {
    fn from_iter<I: IntoIterator<Item = (K, SfxConfig)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for SfxMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, sfx) in &self.0 {
            map.serialize_entry(id, sfx)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SfxMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SfxMapVisitor;

        impl<'de> Visitor<'de> for SfxMapVisitor {
            type Value = SfxMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of style marker ids to clips")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SfxMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, sfx)) = access.next_entry::<String, SfxConfig>()? {
                    entries.push((id, sfx));
                }
                Ok(SfxMap(entries))
            }
        }

        deserializer.deserialize_map(SfxMapVisitor)
    }
}

/// Compile a trigger pattern the way the engine matches it: case-insensitive
/// and unanchored.
pub fn compile_pattern(id: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            id: id.to_string(),
            source,
        })
}

/// Reject volumes outside `0.0..=1.0`, including NaN.
pub fn check_volume(table: TriggerTable, id: &str, volume: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&volume) {
        Ok(())
    } else {
        Err(ConfigError::VolumeOutOfRange {
            table,
            id: id.to_string(),
            volume,
        })
    }
}

impl SoundConfig {
    /// Create an empty configuration for the given storage namespace.
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            sfx: SfxMap::new(),
            text_triggers: Vec::new(),
        }
    }

    /// Check every load-time invariant.
    ///
    /// Fails on the first problem found: empty storage key, empty or
    /// duplicate ids in either table, volumes outside `0.0..=1.0`, and
    /// patterns that do not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        let mut seen = HashSet::new();
        for (id, sfx) in self.sfx.iter() {
            check_id(TriggerTable::Style, id, &mut seen)?;
            check_volume(TriggerTable::Style, id, sfx.volume)?;
        }

        let mut seen = HashSet::new();
        for trigger in &self.text_triggers {
            check_id(TriggerTable::Text, &trigger.id, &mut seen)?;
            check_volume(TriggerTable::Text, &trigger.id, trigger.volume)?;
            compile_pattern(&trigger.id, &trigger.pattern)?;
        }

        Ok(())
    }
}

fn check_id<'a>(
    table: TriggerTable,
    id: &'a str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), ConfigError> {
    if id.trim().is_empty() {
        return Err(ConfigError::EmptyId { table });
    }
    if !seen.insert(id) {
        return Err(ConfigError::DuplicateId {
            table,
            id: id.to_string(),
        });
    }
    Ok(())
}
