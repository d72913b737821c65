//! Application resolution and launching used by the AppChooser and Email
//! portals.
//!
//! Only two things are needed from the system: find the helper application
//! and launch it with a single URI. [`AppLauncher`] captures exactly that so
//! the portals can be exercised without a desktop environment.

mod desktop;
mod exec;

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use async_trait::async_trait;
pub use desktop::{DEFAULT_HELPER_DESKTOP_ID, DesktopEntryLauncher};
pub use exec::expand_exec;
use thiserror::Error;

/// Errors produced while launching an application.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The `Exec` line could not be turned into a command
    #[error("invalid Exec line '{exec}': {reason}")]
    InvalidExec {
        /// The offending `Exec` value
        exec: String,
        /// What was wrong with it
        reason: String,
    },

    /// The process could not be started
    #[error("failed to spawn '{program}': {details}")]
    Spawn {
        /// Program that was started
        program: String,
        /// Underlying I/O error
        details: String,
    },
}

/// A resolved application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Desktop file id, e.g. `steam-http-loader.desktop`
    pub desktop_id: String,
    /// Human-readable name
    pub name: String,
    /// Raw `Exec` line
    pub exec: String,
    /// Desktop file the entry was read from
    pub path: PathBuf,
}

impl AppInfo {
    /// Application id derived from the desktop id.
    pub fn app_id(&self) -> String {
        app_id_from_desktop_id(&self.desktop_id)
    }
}

/// Strips a trailing `.desktop` from a desktop file id.
pub fn app_id_from_desktop_id(desktop_id: &str) -> String {
    desktop_id
        .strip_suffix(".desktop")
        .unwrap_or(desktop_id)
        .to_string()
}

/// Resolves and launches the helper application.
#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// Finds the helper application, if one is installed.
    async fn resolve_helper(&self) -> Option<AppInfo>;

    /// Launches `app` with `uri` as its only argument.
    ///
    /// # Errors
    /// Returns `LaunchError` if the command cannot be built or started.
    async fn launch_uri(&self, app: &AppInfo, uri: &str) -> Result<(), LaunchError>;
}
