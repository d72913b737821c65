use std::{path::PathBuf, sync::Mutex};

use async_trait::async_trait;

use super::{AppInfo, AppLauncher, LaunchError};

/// In-memory launcher recording every URI it is asked to open.
#[derive(Debug, Default)]
pub(crate) struct MockLauncher {
    helper: Option<AppInfo>,
    fail: bool,
    launched: Mutex<Vec<String>>,
}

impl MockLauncher {
    pub(crate) fn with_helper(desktop_id: &str) -> Self {
        Self {
            helper: Some(AppInfo {
                desktop_id: desktop_id.to_string(),
                name: "Helper".to_string(),
                exec: "helper %u".to_string(),
                path: PathBuf::from("/usr/share/applications").join(desktop_id),
            }),
            ..Self::default()
        }
    }

    pub(crate) fn missing() -> Self {
        Self::default()
    }

    pub(crate) fn failing(desktop_id: &str) -> Self {
        Self {
            fail: true,
            ..Self::with_helper(desktop_id)
        }
    }

    pub(crate) fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppLauncher for MockLauncher {
    async fn resolve_helper(&self) -> Option<AppInfo> {
        self.helper.clone()
    }

    async fn launch_uri(&self, app: &AppInfo, uri: &str) -> Result<(), LaunchError> {
        self.launched.lock().unwrap().push(uri.to_string());

        if self.fail {
            return Err(LaunchError::Spawn {
                program: app.exec.clone(),
                details: "mock failure".to_string(),
            });
        }

        Ok(())
    }
}
