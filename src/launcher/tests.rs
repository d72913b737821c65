use std::{fs, path::Path};

use tempfile::TempDir;

use super::{AppLauncher, DesktopEntryLauncher, LaunchError, app_id_from_desktop_id, expand_exec};

const HELPER: &str = "steam-http-loader.desktop";

fn write_entry(data_dir: &Path, contents: &str) {
    let dir = data_dir.join("applications");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(HELPER), contents).unwrap();
}

#[test]
fn app_id_strips_desktop_suffix() {
    assert_eq!(app_id_from_desktop_id(HELPER), "steam-http-loader");
    assert_eq!(app_id_from_desktop_id("org.example.App"), "org.example.App");
}

#[test]
fn exec_expands_uri_codes() {
    assert_eq!(
        expand_exec("steam-http-loader %u", "mailto://a@x.com").unwrap(),
        vec!["steam-http-loader", "mailto://a@x.com"]
    );
    assert_eq!(
        expand_exec("loader --open=%U", "steam://run").unwrap(),
        vec!["loader", "--open=steam://run"]
    );
}

#[test]
fn exec_drops_other_codes_and_keeps_literal_percent() {
    assert_eq!(
        expand_exec("loader %i --icon %c 100%% %u", "x").unwrap(),
        vec!["loader", "--icon", "100%", "x"]
    );
}

#[test]
fn exec_honours_quotes() {
    assert_eq!(
        expand_exec(r#""/opt/my app/loader" "--title=\"Mail\"" %u"#, "x").unwrap(),
        vec!["/opt/my app/loader", "--title=\"Mail\"", "x"]
    );
}

#[test]
fn exec_rejects_malformed_lines() {
    assert!(matches!(
        expand_exec("\"loader %u", "x"),
        Err(LaunchError::InvalidExec { .. })
    ));
    assert!(matches!(
        expand_exec("loader %", "x"),
        Err(LaunchError::InvalidExec { .. })
    ));
    assert!(matches!(
        expand_exec("%i", "x"),
        Err(LaunchError::InvalidExec { .. })
    ));
}

#[tokio::test]
async fn resolves_first_data_dir_with_entry() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    write_entry(
        system.path(),
        "[Desktop Entry]\nName=System Loader\nExec=loader %u\n",
    );

    let launcher = DesktopEntryLauncher::new(
        HELPER,
        vec![user.path().to_path_buf(), system.path().to_path_buf()],
    );
    let app = launcher.resolve_helper().await.unwrap();

    assert_eq!(app.name, "System Loader");
    assert_eq!(app.app_id(), "steam-http-loader");
    assert_eq!(app.path, system.path().join("applications").join(HELPER));
}

#[tokio::test]
async fn hidden_entry_masks_lower_layers() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    write_entry(user.path(), "[Desktop Entry]\nHidden=true\nExec=loader %u\n");
    write_entry(system.path(), "[Desktop Entry]\nExec=loader %u\n");

    let launcher = DesktopEntryLauncher::new(
        HELPER,
        vec![user.path().to_path_buf(), system.path().to_path_buf()],
    );

    assert!(launcher.resolve_helper().await.is_none());
}

#[tokio::test]
async fn entry_without_exec_is_skipped() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    write_entry(user.path(), "[Desktop Entry]\nName=Broken\n");
    write_entry(system.path(), "[Desktop Entry]\nExec=loader %u\n");

    let launcher = DesktopEntryLauncher::new(
        HELPER,
        vec![user.path().to_path_buf(), system.path().to_path_buf()],
    );
    let app = launcher.resolve_helper().await.unwrap();

    assert_eq!(app.exec, "loader %u");
    assert_eq!(app.name, HELPER);
}

#[tokio::test]
async fn missing_program_fails_to_launch() {
    let data = TempDir::new().unwrap();
    write_entry(
        data.path(),
        "[Desktop Entry]\nExec=/nonexistent/steam-http-loader %u\n",
    );

    let launcher = DesktopEntryLauncher::new(HELPER, vec![data.path().to_path_buf()]);
    let app = launcher.resolve_helper().await.unwrap();

    assert!(matches!(
        launcher.launch_uri(&app, "mailto://a@x.com").await,
        Err(LaunchError::Spawn { .. })
    ));
}
