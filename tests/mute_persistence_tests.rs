mod common;

use std::fs;
use std::sync::Arc;

use common::{engine_for, engine_with, yaml_config};
use ifhub_sound::{FileBackend, MemoryBackend, PersistenceBackend, SoundConfig};
use tempfile::TempDir;

fn config(key: &str) -> SoundConfig {
    yaml_config(&format!(
        r#"
storage_key: {key}
sfx:
  glass: {{ src: glass.mp3, volume: 0.4 }}
"#
    ))
}

#[test]
fn test_read_after_write() {
    let mut h = engine_for(&config("feverdream-audio-muted"));
    for value in [true, false, true] {
        h.engine.set_muted(value);
        assert_eq!(h.engine.is_muted(), value);
    }
}

#[test]
fn test_mute_survives_restart_with_file_backend() {
    let temp_dir = TempDir::new().expect("temp dir");
    let state = temp_dir.path().join("state.yaml");

    {
        let mut h = engine_with(
            &config("feverdream-audio-muted"),
            Arc::new(FileBackend::new(&state)),
        );
        h.engine.set_muted(true);
    }

    let mut h = engine_with(
        &config("feverdream-audio-muted"),
        Arc::new(FileBackend::new(&state)),
    );
    assert!(h.engine.is_muted());
    assert!(!h.engine.fire_style("glass"));
    assert_eq!(h.player.count(), 0);
}

#[test]
fn test_engines_with_different_keys_do_not_share_mute() {
    let backend: Arc<dyn PersistenceBackend> = Arc::new(MemoryBackend::new());
    let mut zork = engine_with(&config("zork1-audio-muted"), Arc::clone(&backend));
    let mut fever = engine_with(&config("feverdream-audio-muted"), backend);

    zork.engine.set_muted(true);
    assert!(zork.engine.is_muted());
    assert!(!fever.engine.is_muted());
    assert!(fever.engine.fire_style("glass"));
}

#[test]
fn test_engines_with_same_key_share_mute() {
    let backend: Arc<dyn PersistenceBackend> = Arc::new(MemoryBackend::new());
    let mut first = engine_with(&config("zork1-audio-muted"), Arc::clone(&backend));
    let mut second = engine_with(&config("zork1-audio-muted"), backend);

    first.engine.set_muted(true);
    assert!(second.engine.is_muted());
}

#[test]
fn test_corrupt_stored_value_means_unmuted() {
    let backend = Arc::new(MemoryBackend::new());
    backend
        .set("feverdream-audio-muted", "{\"muted\": yes}")
        .expect("set");
    let mut h = engine_with(&config("feverdream-audio-muted"), backend);
    assert!(!h.engine.is_muted());
    assert!(h.engine.fire_style("glass"));
}

#[test]
fn test_corrupt_state_file_falls_back_to_memory() {
    let temp_dir = TempDir::new().expect("temp dir");
    let state = temp_dir.path().join("state.yaml");
    fs::write(&state, "values: [oops").expect("write");

    let mut h = engine_with(
        &config("feverdream-audio-muted"),
        Arc::new(FileBackend::new(&state)),
    );
    assert!(!h.engine.is_muted());

    // Writes go to memory only; the broken file is left alone.
    h.engine.set_muted(true);
    assert!(h.engine.is_muted());
    assert_eq!(
        fs::read_to_string(&state).expect("read"),
        "values: [oops"
    );
}

#[test]
fn test_mute_does_not_reset_on_reinit() {
    let mut h = engine_for(&config("zork1-audio-muted"));
    h.engine.set_muted(true);
    h.engine
        .init(&config("zork1-audio-muted"))
        .expect("reinit");
    assert!(h.engine.is_muted());
}
