use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher, recommended_watcher};
use tokio::sync::mpsc;

use crate::config::ConfigError;

/// Represents a file system event for the watched file.
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// The path of the file that changed
    pub path: PathBuf,
    /// The type of change that occurred
    pub kind: FileEventKind,
}

/// The type of file system change that occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum FileEventKind {
    /// File was modified
    Modified,
    /// File was created, including being renamed into place
    Created,
    /// File was removed
    Removed,
}

/// Watches a single file for changes.
///
/// The parent directory is watched non-recursively so that editors which
/// save by writing a new file and renaming it over the old one are still
/// observed. Events for other entries in that directory are dropped.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl FileWatcher {
    /// Starts watching `path` and returns the watcher with its event receiver.
    ///
    /// Uses an unbounded channel since file events are infrequent but bursty.
    /// Dropping the watcher stops event delivery.
    ///
    /// # Errors
    /// * `ConfigError::FileWatcherInitError` - The platform watcher could not be created
    /// * `ConfigError::FileWatchError` - The file's directory could not be watched
    pub fn watch(
        path: impl AsRef<Path>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<FileEvent>), ConfigError> {
        let path = path.as_ref();
        let watch_error = |details: String| ConfigError::FileWatchError {
            path: path.to_path_buf(),
            details,
        };

        let path = path
            .canonicalize()
            .map_err(|e| watch_error(e.to_string()))?;
        let parent = path
            .parent()
            .ok_or_else(|| watch_error("path has no parent directory".to_string()))?
            .to_path_buf();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let target = path.clone();

        let mut watcher = recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else {
                return;
            };

            let kind = match event.kind {
                EventKind::Create(_) => FileEventKind::Created,
                EventKind::Modify(_) => FileEventKind::Modified,
                EventKind::Remove(_) => FileEventKind::Removed,
                _ => return,
            };

            for path in event.paths.into_iter().filter(|p| *p == target) {
                let _ = event_tx.send(FileEvent {
                    path,
                    kind: kind.clone(),
                });
            }
        })
        .map_err(|e| ConfigError::FileWatcherInitError {
            details: e.to_string(),
        })?;

        watcher
            .watch(&parent, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(e.to_string()))?;

        Ok((
            Self {
                _watcher: watcher,
                path,
            },
            event_rx,
        ))
    }

    /// The canonical path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
