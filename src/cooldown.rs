//! Per-trigger cooldown ledger.
//!
//! Tracks when each trigger id last fired and decides whether it may fire
//! again. Ineligible attempts are dropped, never queued. Entries are never
//! evicted: the key set is bounded by the configured trigger count.

use std::collections::HashMap;

/// Last-fired timestamps keyed by trigger id.
#[derive(Debug, Default, Clone)]
pub struct CooldownRegistry {
    /// Map of trigger id -> last fire time (epoch ms)
    last_fire: HashMap<String, u64>,
}

impl CooldownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `id` may fire at `now_ms`. Returns true if eligible and
    /// records `now_ms` as the last fire time; returns false otherwise and
    /// leaves the ledger untouched.
    ///
    /// A `cooldown_ms` of 0 is always eligible. A clock that has moved
    /// backwards counts as zero elapsed time.
    pub fn try_fire(&mut self, id: &str, cooldown_ms: u64, now_ms: u64) -> bool {
        if let Some(&last) = self.last_fire.get(id) {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < cooldown_ms {
                return false;
            }
        }
        self.last_fire.insert(id.to_string(), now_ms);
        true
    }

    /// When `id` last fired, if ever.
    pub fn last_fired(&self, id: &str) -> Option<u64> {
        self.last_fire.get(id).copied()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.last_fire.clear();
    }

    pub fn len(&self) -> usize {
        self.last_fire.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fire.is_empty()
    }
}
