//! Unit tests for config module
//!
//! Search-path construction is in-memory; resolution uses temp directories.

#![allow(clippy::panic)]

use std::{ffi::OsString, fs, path::PathBuf};

use tempfile::TempDir;

use crate::config::{ConfigError, SearchPath, resolve_and_parse};

fn write_portal_file(base: &std::path::Path, filename: &str, content: &str) -> PathBuf {
    let dir = base.join("SteamOS/portal");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn search_path_prefers_config_home() {
    let search = SearchPath::from_vars(
        Some(OsString::from("/home/deck/.config")),
        Some(OsString::from("/home/deck")),
        Some(OsString::from("/etc/xdg:/usr/share/xdg")),
    );

    assert_eq!(
        search.candidate_dirs(),
        vec![
            PathBuf::from("/home/deck/.config/SteamOS/portal"),
            PathBuf::from("/etc/xdg/SteamOS/portal"),
            PathBuf::from("/usr/share/xdg/SteamOS/portal"),
        ]
    );
}

#[test]
fn search_path_falls_back_to_home_and_etc_xdg() {
    let search = SearchPath::from_vars(None, Some(OsString::from("/home/deck")), None);

    assert_eq!(
        search.candidate_dirs(),
        vec![
            PathBuf::from("/home/deck/.config/SteamOS/portal"),
            PathBuf::from("/etc/xdg/SteamOS/portal"),
        ]
    );
}

#[test]
fn search_path_ignores_relative_entries() {
    let search = SearchPath::from_vars(
        Some(OsString::from("relative/config")),
        None,
        Some(OsString::from("relative:/opt/xdg")),
    );

    assert_eq!(
        search.candidate_dirs(),
        vec![PathBuf::from("/opt/xdg/SteamOS/portal")]
    );
}

#[test]
fn user_layer_wins_without_merging() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    let user_file = write_portal_file(
        user.path(),
        "settings.conf",
        "[org.freedesktop.appearance]\ncolor-scheme=1\n",
    );
    write_portal_file(
        system.path(),
        "settings.conf",
        "[org.freedesktop.appearance]\ncolor-scheme=2\ncontrast=1\n",
    );

    let search = SearchPath::new(
        Some(user.path().to_path_buf()),
        vec![system.path().to_path_buf()],
    );
    let loaded = resolve_and_parse("settings.conf", &search).unwrap();

    assert_eq!(loaded.path, user_file);
    assert_eq!(
        loaded
            .key_file
            .integer("org.freedesktop.appearance", "color-scheme")
            .unwrap(),
        1
    );
    assert!(
        loaded
            .key_file
            .integer("org.freedesktop.appearance", "contrast")
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn system_dirs_are_searched_in_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_portal_file(second.path(), "lockdown.conf", "[Lockdown]\nPrinting=true\n");
    let expected = write_portal_file(first.path(), "lockdown.conf", "[Lockdown]\n");

    let search = SearchPath::new(
        None,
        vec![first.path().to_path_buf(), second.path().to_path_buf()],
    );
    let loaded = resolve_and_parse("lockdown.conf", &search).unwrap();

    assert_eq!(loaded.path, expected);
}

#[test]
fn missing_file_reports_searched_dirs() {
    let empty = TempDir::new().unwrap();
    let search = SearchPath::new(Some(empty.path().to_path_buf()), vec![]);

    let err = resolve_and_parse("settings.conf", &search).unwrap_err();
    match err {
        ConfigError::NotFound { filename, searched } => {
            assert_eq!(filename, "settings.conf");
            assert_eq!(searched, vec![empty.path().join("SteamOS/portal")]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparsable_user_file_does_not_fall_through() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    write_portal_file(user.path(), "settings.conf", "not a key file\n");
    write_portal_file(
        system.path(),
        "settings.conf",
        "[org.freedesktop.appearance]\ncolor-scheme=1\n",
    );

    let search = SearchPath::new(
        Some(user.path().to_path_buf()),
        vec![system.path().to_path_buf()],
    );

    assert!(matches!(
        resolve_and_parse("settings.conf", &search),
        Err(ConfigError::Load { .. })
    ));
}
