//! Persisted mute flag.
//!
//! The flag lives in a [`PersistenceBackend`] under a caller-chosen storage
//! key, so two engines configured for different games keep separate flags.
//! An absent or unreadable value means unmuted.

use std::sync::Arc;

use crate::persistence::PersistenceBackend;

const MUTED: &str = "true";
const UNMUTED: &str = "false";

/// Mute flag backed by a persistent key/value slot.
///
/// After the first backend failure the store stops touching the backend and
/// keeps the flag in memory for the rest of the session.
pub struct MuteStore {
    storage_key: String,
    backend: Arc<dyn PersistenceBackend>,
    /// Last value written or read, served once the backend has failed.
    cached: bool,
    degraded: bool,
}

impl std::fmt::Debug for MuteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MuteStore")
            .field("storage_key", &self.storage_key)
            .field("cached", &self.cached)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl MuteStore {
    /// Open the flag stored under `storage_key`, reading its initial value.
    pub fn open(storage_key: impl Into<String>, backend: Arc<dyn PersistenceBackend>) -> Self {
        let mut store = Self {
            storage_key: storage_key.into(),
            backend,
            cached: false,
            degraded: false,
        };
        store.cached = store.read();
        log::info!(
            "Mute state for '{}': {}",
            store.storage_key,
            if store.cached { "muted" } else { "active" }
        );
        store
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Whether playback is currently suppressed.
    pub fn is_muted(&mut self) -> bool {
        if !self.degraded {
            self.cached = self.read();
        }
        self.cached
    }

    /// Persist a new mute value. Backend failures are logged and the value is
    /// kept in memory instead.
    pub fn set_muted(&mut self, muted: bool) {
        self.cached = muted;
        if self.degraded {
            return;
        }
        let value = if muted { MUTED } else { UNMUTED };
        if let Err(e) = self.backend.set(&self.storage_key, value) {
            log::warn!(
                "Failed to persist mute state for '{}': {}; keeping it in memory for this session",
                self.storage_key,
                e
            );
            self.degraded = true;
        }
    }

    /// True once a backend failure has switched the store to memory only.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn read(&mut self) -> bool {
        match self.backend.get(&self.storage_key) {
            Ok(Some(raw)) => parse_flag(&raw).unwrap_or_else(|| {
                log::warn!(
                    "Ignoring non-boolean mute value {:?} for '{}'; treating as unmuted",
                    raw,
                    self.storage_key
                );
                false
            }),
            Ok(None) => false,
            Err(e) => {
                log::warn!(
                    "Failed to read mute state for '{}': {}; using in-memory value",
                    self.storage_key,
                    e
                );
                self.degraded = true;
                // Last value read or set this session; unmuted if there is none.
                self.cached
            }
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(MUTED) {
        Some(true)
    } else if raw.eq_ignore_ascii_case(UNMUTED) {
        Some(false)
    } else {
        None
    }
}
