//! Default values for configuration settings.

/// Debounce window for config hot reload, in milliseconds.
pub fn reload_debounce_ms() -> u64 {
    100
}
