//! Sound config file watcher for hot reload while authoring.
//!
//! Watches one config file and yields debounced reload events. The host
//! reloads by handing the file back to the engine's `init`.

use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, PollWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

/// The watched sound config file has changed.
#[derive(Debug, Clone)]
pub struct ConfigReloadEvent {
    pub path: PathBuf,
}

/// Watches a sound config file and sends reload events.
pub struct ConfigWatcher {
    /// Kept alive to maintain watching.
    _watcher: Box<dyn Watcher + Send>,
    event_receiver: Receiver<ConfigReloadEvent>,
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher").finish_non_exhaustive()
    }
}

/// Debounce gate shared by the watcher callback.
#[derive(Clone)]
struct ReloadFilter {
    filename: OsString,
    path: PathBuf,
    debounce: Duration,
    tx: Sender<ConfigReloadEvent>,
    last_sent: Arc<Mutex<Option<Instant>>>,
}

impl ReloadFilter {
    fn handle(&self, result: notify::Result<Event>) {
        let Ok(event) = result else { return };

        // Create covers editors that save via rename.
        if !matches!(
            event.kind,
            notify::EventKind::Modify(_) | notify::EventKind::Create(_)
        ) {
            return;
        }

        if !event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| f == self.filename))
        {
            return;
        }

        {
            let now = Instant::now();
            let mut last = self.last_sent.lock();
            if last.is_some_and(|t| now.duration_since(t) < self.debounce) {
                log::trace!("Debouncing sound config reload event");
                return;
            }
            *last = Some(now);
        }

        log::info!("Sound config changed: {}", self.path.display());
        if let Err(e) = self.tx.send(ConfigReloadEvent {
            path: self.path.clone(),
        }) {
            log::error!("Failed to send sound config reload event: {}", e);
        }
    }
}

impl ConfigWatcher {
    /// Watch `config_path` with the default debounce window.
    pub fn watch(config_path: &Path) -> Result<Self> {
        Self::new(config_path, crate::defaults::reload_debounce_ms())
    }

    /// Create a new watcher.
    ///
    /// Uses the platform's native backend when available and falls back to a
    /// 500 ms `PollWatcher` otherwise (containers, network filesystems).
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist or both backends fail.
    pub fn new(config_path: &Path, debounce_delay_ms: u64) -> Result<Self> {
        if !config_path.exists() {
            anyhow::bail!("Sound config file not found: {}", config_path.display());
        }

        let canonical = config_path
            .canonicalize()
            .unwrap_or_else(|_| config_path.to_path_buf());

        let filename = canonical
            .file_name()
            .context("Sound config path has no filename")?
            .to_os_string();

        let parent_dir = canonical
            .parent()
            .context("Sound config path has no parent directory")?
            .to_path_buf();

        let (tx, rx) = channel::<ConfigReloadEvent>();
        let filter = ReloadFilter {
            filename,
            path: canonical.clone(),
            debounce: Duration::from_millis(debounce_delay_ms),
            tx,
            last_sent: Arc::new(Mutex::new(None)),
        };

        let mut watcher = Self::create_watcher(filter)?;
        watcher
            .watch(&parent_dir, RecursiveMode::NonRecursive)
            .with_context(|| {
                format!(
                    "Failed to watch sound config directory: {}",
                    parent_dir.display()
                )
            })?;

        log::info!("Sound config hot reload: watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            event_receiver: rx,
        })
    }

    fn create_watcher(filter: ReloadFilter) -> Result<Box<dyn Watcher + Send>> {
        let fallback = filter.clone();
        match notify::recommended_watcher(move |res: notify::Result<Event>| filter.handle(res)) {
            Ok(w) => {
                log::debug!("Sound config watcher: using native backend");
                Ok(Box::new(w))
            }
            Err(e) => {
                log::warn!(
                    "Sound config watcher: native backend unavailable ({}); falling back to PollWatcher",
                    e
                );
                let poll_watcher = PollWatcher::new(
                    move |res: notify::Result<Event>| fallback.handle(res),
                    NotifyConfig::default().with_poll_interval(Duration::from_millis(500)),
                )
                .context("Failed to create fallback PollWatcher")?;
                Ok(Box::new(poll_watcher))
            }
        }
    }

    /// Next pending reload event, if any (non-blocking).
    pub fn try_recv(&self) -> Option<ConfigReloadEvent> {
        self.event_receiver.try_recv().ok()
    }
}
