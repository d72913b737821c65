use std::{path::PathBuf, process::Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::{AppInfo, AppLauncher, LaunchError, expand_exec};
use crate::{config::DataPaths, keyfile::KeyFile};

/// Desktop id of the helper that handles Steam and `mailto:` URIs.
pub const DEFAULT_HELPER_DESKTOP_ID: &str = "steam-http-loader.desktop";

const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// Resolves the helper from installed `.desktop` files and spawns it.
#[derive(Debug, Clone)]
pub struct DesktopEntryLauncher {
    desktop_id: String,
    data_dirs: Vec<PathBuf>,
}

impl DesktopEntryLauncher {
    /// Creates a launcher searching `data_dirs` (each with an
    /// `applications/` subdirectory) in priority order.
    pub fn new(desktop_id: impl Into<String>, data_dirs: Vec<PathBuf>) -> Self {
        Self {
            desktop_id: desktop_id.into(),
            data_dirs,
        }
    }

    /// Creates a launcher for the default helper using the XDG data
    /// directories from the environment.
    pub fn from_env() -> Self {
        Self::new(DEFAULT_HELPER_DESKTOP_ID, DataPaths::data_dirs())
    }

    fn read_entry(&self, path: PathBuf) -> Result<Option<AppInfo>, String> {
        let key_file = KeyFile::load(&path).map_err(|e| e.to_string())?;

        if key_file
            .boolean(DESKTOP_ENTRY_GROUP, "Hidden")
            .unwrap_or(false)
        {
            return Ok(None);
        }

        let exec = key_file
            .string(DESKTOP_ENTRY_GROUP, "Exec")
            .map_err(|e| e.to_string())?;
        let name = key_file
            .string(DESKTOP_ENTRY_GROUP, "Name")
            .unwrap_or_else(|_| self.desktop_id.clone());

        Ok(Some(AppInfo {
            desktop_id: self.desktop_id.clone(),
            name,
            exec,
            path,
        }))
    }
}

#[async_trait]
impl AppLauncher for DesktopEntryLauncher {
    /// Returns the first usable entry; a `Hidden=true` entry masks any
    /// lower-priority copy.
    async fn resolve_helper(&self) -> Option<AppInfo> {
        for dir in &self.data_dirs {
            let path = dir.join("applications").join(&self.desktop_id);
            if !path.is_file() {
                continue;
            }

            match self.read_entry(path) {
                Ok(entry) => return entry,
                Err(e) => debug!("Skipping {}: {e}", self.desktop_id),
            }
        }

        debug!("No usable {} found", self.desktop_id);
        None
    }

    #[instrument(skip(self, app), fields(app = %app.name))]
    async fn launch_uri(&self, app: &AppInfo, uri: &str) -> Result<(), LaunchError> {
        let argv = expand_exec(&app.exec, uri)?;
        let (program, args) = argv.split_first().ok_or_else(|| LaunchError::InvalidExec {
            exec: app.exec.clone(),
            reason: "no program".to_string(),
        })?;

        debug!("Launching {} with {uri}", app.name);

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| LaunchError::Spawn {
                program: program.clone(),
                details: e.to_string(),
            })?;

        Ok(())
    }
}
