//! Sound engine orchestration.
//!
//! The engine is driven synchronously by the host interpreter, one output
//! chunk or style marker at a time, in delivery order. It has two effective
//! modes, muted and active, decided solely by the [`MuteStore`]:
//!
//! - **Muted**: `fire_style` and `on_text` do nothing. The cooldown registry
//!   is neither consulted nor updated, so unmuting never inherits a cooldown
//!   window started by a match nobody heard.
//! - **Active**: style markers play unconditionally; text matches play when
//!   their cooldown allows.
//!
//! Playback and persistence failures are logged and swallowed. Only
//! configuration errors from [`SoundEngine::init`] reach the caller.

use std::path::Path;
use std::sync::Arc;

use ifhub_sound_config::SoundConfig;

use crate::clock::{Clock, SystemClock};
use crate::cooldown::CooldownRegistry;
use crate::error::ConfigError;
use crate::mute::MuteStore;
use crate::persistence::PersistenceBackend;
use crate::player::ClipPlayer;
use crate::triggers::{StyleTriggerTable, TextTriggerTable};

/// State derived from the most recent successful `init`.
struct Loaded {
    style: StyleTriggerTable,
    text: TextTriggerTable,
    mute: MuteStore,
}

/// Trigger matching and playback scheduling for one game front-end.
pub struct SoundEngine {
    player: Box<dyn ClipPlayer>,
    backend: Arc<dyn PersistenceBackend>,
    clock: Box<dyn Clock>,
    cooldowns: CooldownRegistry,
    loaded: Option<Loaded>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine")
            .field("cooldowns", &self.cooldowns)
            .field("storage_key", &self.storage_key())
            .finish_non_exhaustive()
    }
}

impl SoundEngine {
    /// Create an engine with no configuration loaded. Until [`init`] succeeds
    /// every trigger call is a no-op.
    ///
    /// [`init`]: SoundEngine::init
    pub fn new(player: Box<dyn ClipPlayer>, backend: Arc<dyn PersistenceBackend>) -> Self {
        Self {
            player,
            backend,
            clock: Box::new(SystemClock),
            cooldowns: CooldownRegistry::new(),
            loaded: None,
        }
    }

    /// Replace the time source used for cooldowns.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Load a configuration, replacing any previous one.
    ///
    /// Building the two tables is the validation: ids, volumes and patterns
    /// are checked (and each pattern compiled once) before any engine state
    /// changes, so a rejected config leaves the previous one in place. Cooldown history is kept across reloads; use
    /// [`reset_session`](SoundEngine::reset_session) to clear it. The mute
    /// flag is (re)read from persistence unless the storage key is unchanged.
    pub fn init(&mut self, config: &SoundConfig) -> Result<(), ConfigError> {
        if config.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        let style = StyleTriggerTable::from_config(&config.sfx)?;
        let text = TextTriggerTable::from_config(&config.text_triggers)?;

        let mute = match self.loaded.take() {
            Some(prev) if prev.mute.storage_key() == config.storage_key => prev.mute,
            _ => MuteStore::open(config.storage_key.clone(), Arc::clone(&self.backend)),
        };

        log::info!(
            "Sound engine initialised for '{}': {} style triggers, {} text triggers",
            config.storage_key,
            style.len(),
            text.len()
        );

        self.loaded = Some(Loaded { style, text, mute });
        Ok(())
    }

    /// Load a config file (YAML, JSON or TOML) and [`init`](SoundEngine::init) from it.
    pub fn init_from_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        let config = SoundConfig::read_from_path(path)?;
        self.init(&config)
    }

    /// Forget all cooldown history.
    pub fn reset_session(&mut self) {
        log::debug!("Clearing {} cooldown entries", self.cooldowns.len());
        self.cooldowns.clear();
    }

    /// Play the clip bound to style marker `id`. Returns whether a clip was
    /// handed to the player.
    ///
    /// Unknown markers are expected and ignored.
    pub fn fire_style(&mut self, id: &str) -> bool {
        let Some(loaded) = self.loaded.as_mut() else {
            return false;
        };
        if loaded.mute.is_muted() {
            return false;
        }
        let Some(trigger) = loaded.style.lookup(id) else {
            log::debug!("No sound bound to style marker '{}'", id);
            return false;
        };

        log::info!(
            "Style trigger '{}' firing: '{}' at volume {}",
            trigger.id,
            trigger.clip_path,
            trigger.volume
        );
        start_clip(
            self.player.as_ref(),
            &trigger.id,
            &trigger.clip_path,
            trigger.volume,
        )
    }

    /// Match a chunk of rendered game output against every text trigger and
    /// play each match whose cooldown allows it. Returns the number of clips
    /// handed to the player.
    pub fn on_text(&mut self, chunk: &str) -> usize {
        let Some(loaded) = self.loaded.as_mut() else {
            return 0;
        };
        if loaded.mute.is_muted() {
            return 0;
        }

        let now = self.clock.now_ms();
        let mut started = 0;
        for trigger in loaded.text.match_all(chunk) {
            if !self.cooldowns.try_fire(&trigger.id, trigger.cooldown_ms, now) {
                log::debug!("Text trigger '{}' suppressed by cooldown", trigger.id);
                continue;
            }
            log::info!(
                "Text trigger '{}' firing: '{}' at volume {}",
                trigger.id,
                trigger.clip_path,
                trigger.volume
            );
            if start_clip(
                self.player.as_ref(),
                &trigger.id,
                &trigger.clip_path,
                trigger.volume,
            ) {
                started += 1;
            }
        }
        started
    }

    /// Persist a new mute value. Clips already playing are not stopped.
    pub fn set_muted(&mut self, muted: bool) {
        match self.loaded.as_mut() {
            Some(loaded) => loaded.mute.set_muted(muted),
            None => log::warn!("set_muted({}) ignored: sound engine not initialised", muted),
        }
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_muted(&mut self) -> bool {
        let muted = !self.is_muted();
        self.set_muted(muted);
        muted
    }

    /// Current mute value. An uninitialised engine reports unmuted.
    ///
    /// Takes `&mut self` because the first read after `init` may hit the
    /// persistence backend and cache the result in the [`MuteStore`].
    pub fn is_muted(&mut self) -> bool {
        self.loaded
            .as_mut()
            .is_some_and(|loaded| loaded.mute.is_muted())
    }

    /// Storage key of the loaded config, if any.
    pub fn storage_key(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.mute.storage_key())
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn style_triggers(&self) -> Option<&StyleTriggerTable> {
        self.loaded.as_ref().map(|l| &l.style)
    }

    pub fn text_triggers(&self) -> Option<&TextTriggerTable> {
        self.loaded.as_ref().map(|l| &l.text)
    }

    pub fn cooldowns(&self) -> &CooldownRegistry {
        &self.cooldowns
    }
}

/// Hand a clip to the player, logging and swallowing any failure.
fn start_clip(player: &dyn ClipPlayer, id: &str, path: &str, volume: f32) -> bool {
    match player.play(path, volume) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Sound trigger '{}' failed to play: {}", id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::PlaybackError;
    use crate::persistence::MemoryBackend;
    use ifhub_sound_config::{SfxConfig, TextTriggerConfig};
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Recorder {
        plays: Arc<Mutex<Vec<(String, f32)>>>,
        fail: bool,
    }

    impl Recorder {
        fn count(&self) -> usize {
            self.plays.lock().len()
        }
    }

    impl ClipPlayer for Recorder {
        fn play(&self, path: &str, volume: f32) -> Result<(), PlaybackError> {
            if self.fail {
                return Err(PlaybackError::NotFound { path: path.into() });
            }
            self.plays.lock().push((path.to_string(), volume));
            Ok(())
        }
    }

    fn bird_config() -> SoundConfig {
        let mut config = SoundConfig::new("zork1-audio-muted");
        config.text_triggers.push(TextTriggerConfig {
            id: "bird".into(),
            pattern: "chirping of a song bird".into(),
            src: "audio/sfx/bird.mp3".into(),
            volume: 0.25,
            cooldown_ms: 10_000,
        });
        config.sfx.insert(
            "glass",
            SfxConfig {
                src: "audio/sfx/glass.mp3".into(),
                volume: 0.4,
            },
        );
        config
    }

    fn engine() -> (SoundEngine, Recorder, ManualClock) {
        let recorder = Recorder::default();
        let clock = ManualClock::new(0);
        let mut engine = SoundEngine::new(Box::new(recorder.clone()), Arc::new(MemoryBackend::new()))
            .with_clock(Box::new(clock.clone()));
        engine.init(&bird_config()).expect("init");
        (engine, recorder, clock)
    }

    #[test]
    fn test_uninitialised_engine_is_inert() {
        let recorder = Recorder::default();
        let mut engine =
            SoundEngine::new(Box::new(recorder.clone()), Arc::new(MemoryBackend::new()));
        assert!(!engine.fire_style("glass"));
        assert_eq!(engine.on_text("chirping of a song bird"), 0);
        engine.set_muted(true);
        assert!(!engine.is_muted());
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_muted_on_text_leaves_cooldowns_untouched() {
        let (mut engine, recorder, clock) = engine();
        engine.set_muted(true);
        assert_eq!(engine.on_text("the chirping of a song bird"), 0);
        assert!(engine.cooldowns().is_empty());

        clock.set(1000);
        engine.set_muted(false);
        assert_eq!(engine.on_text("the chirping of a song bird"), 1);
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_rejected_init_keeps_previous_config() {
        let (mut engine, _recorder, _clock) = engine();
        let mut broken = bird_config();
        broken.text_triggers[0].pattern = "(".into();
        assert!(engine.init(&broken).is_err());
        assert_eq!(engine.text_triggers().map(|t| t.len()), Some(1));
        assert!(engine.fire_style("glass"));
    }

    #[test]
    fn test_reinit_keeps_cooldowns_until_reset() {
        let (mut engine, recorder, clock) = engine();
        assert_eq!(engine.on_text("chirping of a song bird"), 1);

        engine.init(&bird_config()).expect("reinit");
        clock.set(100);
        assert_eq!(engine.on_text("chirping of a song bird"), 0);

        engine.reset_session();
        assert_eq!(engine.on_text("chirping of a song bird"), 1);
        assert_eq!(recorder.count(), 2);
    }

    #[test]
    fn test_reinit_same_key_keeps_mute_state() {
        let (mut engine, _recorder, _clock) = engine();
        engine.set_muted(true);
        engine.init(&bird_config()).expect("reinit");
        assert!(engine.is_muted());
    }

    #[test]
    fn test_playback_failure_is_swallowed_but_cooldown_recorded() {
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut engine = SoundEngine::new(Box::new(recorder), Arc::new(MemoryBackend::new()))
            .with_clock(Box::new(ManualClock::new(0)));
        engine.init(&bird_config()).expect("init");

        assert_eq!(engine.on_text("chirping of a song bird"), 0);
        assert!(!engine.fire_style("glass"));
        assert_eq!(engine.cooldowns().last_fired("bird"), Some(0));
    }

    #[test]
    fn test_toggle_muted() {
        let (mut engine, _recorder, _clock) = engine();
        assert!(engine.toggle_muted());
        assert!(engine.is_muted());
        assert!(!engine.toggle_muted());
        assert!(!engine.is_muted());
    }
}
