use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use tempfile::TempDir;

use super::{ConfigReloader, ConfigTarget};
use crate::{
    config::{ConfigError, SearchPath},
    keyfile::KeyFile,
};

#[derive(Default)]
struct Recorder {
    applies: Mutex<Vec<(Option<i32>, bool)>>,
}

impl Recorder {
    fn applies(&self) -> Vec<(Option<i32>, bool)> {
        self.applies.lock().unwrap().clone()
    }
}

impl ConfigTarget for Recorder {
    const FILE_NAME: &'static str = "test.conf";

    fn apply(&self, key_file: &KeyFile, notify: bool) {
        let value = key_file.integer("Test", "value").ok();
        self.applies.lock().unwrap().push((value, notify));
    }
}

fn portal_dir(base: &Path) -> PathBuf {
    let dir = base.join("SteamOS/portal");
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn reloader_for(user: &TempDir) -> Arc<ConfigReloader<Recorder>> {
    ConfigReloader::with_debounce(
        Arc::new(Recorder::default()),
        SearchPath::new(Some(user.path().to_path_buf()), vec![]),
        Duration::from_millis(50),
    )
}

async fn wait_for_applies(recorder: &Recorder, count: usize) -> bool {
    for _ in 0..100 {
        if recorder.applies().len() >= count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn missing_file_stays_unattached() {
    let user = TempDir::new().unwrap();
    let reloader = reloader_for(&user);

    let result = reloader.reload(false);

    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    assert!(reloader.watched_path().is_none());
    assert!(reloader.target().applies().is_empty());
}

#[tokio::test]
async fn first_load_is_silent_and_attaches_watch() {
    let user = TempDir::new().unwrap();
    let file = portal_dir(user.path()).join("test.conf");
    fs::write(&file, "[Test]\nvalue=1\n").unwrap();
    let reloader = reloader_for(&user);

    let loaded = reloader.reload(false).unwrap();

    assert_eq!(loaded, file);
    assert_eq!(reloader.target().applies(), vec![(Some(1), false)]);
    assert_eq!(reloader.watched_path(), Some(file.canonicalize().unwrap()));
}

#[tokio::test]
async fn file_change_reloads_with_notifications() {
    let user = TempDir::new().unwrap();
    let file = portal_dir(user.path()).join("test.conf");
    fs::write(&file, "[Test]\nvalue=1\n").unwrap();
    let reloader = reloader_for(&user);
    reloader.reload(false).unwrap();

    fs::write(&file, "[Test]\nvalue=2\n").unwrap();

    assert!(wait_for_applies(reloader.target(), 2).await);
    assert_eq!(reloader.target().applies().last(), Some(&(Some(2), true)));
}

#[tokio::test]
async fn rename_over_watched_file_is_seen() {
    let user = TempDir::new().unwrap();
    let dir = portal_dir(user.path());
    let file = dir.join("test.conf");
    fs::write(&file, "[Test]\nvalue=1\n").unwrap();
    let reloader = reloader_for(&user);
    reloader.reload(false).unwrap();

    let staged = dir.join("test.conf.tmp");
    fs::write(&staged, "[Test]\nvalue=7\n").unwrap();
    fs::rename(&staged, &file).unwrap();

    assert!(wait_for_applies(reloader.target(), 2).await);
    assert_eq!(reloader.target().applies().last(), Some(&(Some(7), true)));
}

#[tokio::test]
async fn watch_target_stays_on_first_file() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    let system_file = portal_dir(system.path()).join("test.conf");
    fs::write(&system_file, "[Test]\nvalue=1\n").unwrap();

    let reloader = ConfigReloader::with_debounce(
        Arc::new(Recorder::default()),
        SearchPath::new(
            Some(user.path().to_path_buf()),
            vec![system.path().to_path_buf()],
        ),
        Duration::from_millis(50),
    );
    reloader.reload(false).unwrap();

    let user_file = portal_dir(user.path()).join("test.conf");
    fs::write(&user_file, "[Test]\nvalue=9\n").unwrap();

    // Re-resolution picks the new layer, the watch does not move.
    assert_eq!(reloader.reload(true).unwrap(), user_file);
    assert_eq!(
        reloader.watched_path(),
        Some(system_file.canonicalize().unwrap())
    );
}
