//! Live reload of portal configuration files.
//!
//! A [`ConfigReloader`] resolves its target's file on the search path,
//! applies it, and on the first success attaches a [`FileWatcher`] to the
//! resolved path. Every later change to that file re-runs the same
//! [`ConfigReloader::reload`] entry point with notifications enabled.

mod file_watcher;

#[cfg(test)]
mod tests;

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError, Weak},
    time::Duration,
};

pub use file_watcher::{FileEvent, FileEventKind, FileWatcher};
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle, time::Instant};
use tracing::{debug, instrument, trace};

use crate::{
    config::{ConfigError, SearchPath, resolve_and_parse},
    keyfile::KeyFile,
};

/// Quiet period after the last file event before a reload runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// State that is populated from one portal configuration file.
pub trait ConfigTarget: Send + Sync + 'static {
    /// File name looked up in every search directory.
    const FILE_NAME: &'static str;

    /// Applies freshly parsed contents.
    ///
    /// `notify` is false for the initial load and true for every reload
    /// triggered by a file change.
    fn apply(&self, key_file: &KeyFile, notify: bool);
}

/// Whether live reload is available.
#[derive(Default)]
enum WatchState {
    #[default]
    Unattached,
    Watching {
        watcher: FileWatcher,
        _task: JoinHandle<()>,
    },
}

/// Drives load, watch and reload for one [`ConfigTarget`].
pub struct ConfigReloader<T: ConfigTarget> {
    target: Arc<T>,
    search_path: SearchPath,
    debounce: Duration,
    state: Mutex<WatchState>,
}

impl<T: ConfigTarget> ConfigReloader<T> {
    /// Creates a reloader in the unattached state.
    pub fn new(target: Arc<T>, search_path: SearchPath) -> Arc<Self> {
        Self::with_debounce(target, search_path, DEFAULT_DEBOUNCE)
    }

    /// Creates a reloader with a custom debounce window.
    pub fn with_debounce(target: Arc<T>, search_path: SearchPath, debounce: Duration) -> Arc<Self> {
        Arc::new(Self {
            target,
            search_path,
            debounce,
            state: Mutex::new(WatchState::Unattached),
        })
    }

    /// The state this reloader populates.
    pub fn target(&self) -> &Arc<T> {
        &self.target
    }

    /// The file being watched, once a watch has been attached.
    pub fn watched_path(&self) -> Option<PathBuf> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            WatchState::Unattached => None,
            WatchState::Watching { watcher, .. } => Some(watcher.path().to_path_buf()),
        }
    }

    /// Resolves, parses and applies the configuration file.
    ///
    /// The search path is re-resolved on every call, but the watch attached
    /// after the first success stays on that first file for the lifetime of
    /// the reloader. Failures are logged at debug level and leave the
    /// target untouched.
    ///
    /// # Errors
    /// Returns the `ConfigError` from resolution or parsing.
    #[instrument(skip(self), fields(file = T::FILE_NAME))]
    pub fn reload(self: &Arc<Self>, notify: bool) -> Result<PathBuf, ConfigError> {
        let loaded = resolve_and_parse(T::FILE_NAME, &self.search_path).inspect_err(|e| {
            debug!("Unable to read {}: {e}", T::FILE_NAME);
        })?;

        debug!(
            "Loading {} configuration from: {}",
            T::FILE_NAME,
            loaded.path.display()
        );
        self.target.apply(&loaded.key_file, notify);

        self.attach_watch(&loaded.path);

        Ok(loaded.path)
    }

    fn attach_watch(self: &Arc<Self>, path: &Path) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, WatchState::Watching { .. }) {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            debug!("Unable to monitor {}: no async runtime", T::FILE_NAME);
            return;
        };

        let (watcher, events) = match FileWatcher::watch(path) {
            Ok(watching) => watching,
            Err(e) => {
                debug!("Unable to monitor {}: {e}", T::FILE_NAME);
                return;
            }
        };

        let task = runtime.spawn(watch_loop(Arc::downgrade(self), events, self.debounce));

        *state = WatchState::Watching {
            watcher,
            _task: task,
        };
    }
}

async fn watch_loop<T: ConfigTarget>(
    reloader: Weak<ConfigReloader<T>>,
    mut events: mpsc::UnboundedReceiver<FileEvent>,
    debounce: Duration,
) {
    let mut pending = false;
    let debounce_sleep = tokio::time::sleep(debounce);

    tokio::pin!(debounce_sleep);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };

                trace!("{:?} {}", event.kind, event.path.display());
                pending = true;
                debounce_sleep.as_mut().reset(Instant::now() + debounce);
            }

            _ = &mut debounce_sleep, if pending => {
                pending = false;

                let Some(reloader) = reloader.upgrade() else {
                    break;
                };

                let _ = reloader.reload(true);
            }
        }
    }
}
