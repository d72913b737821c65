//! Wires the portal interfaces onto the session bus and owns their state.

use std::sync::Arc;

use futures::StreamExt;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use zbus::{
    Connection,
    fdo::{DBusProxy, RequestNameFlags, RequestNameReply},
    object_server::{Interface, SignalEmitter},
};

use crate::{
    appchooser::AppChooserPortal,
    config::SearchPath,
    core::{DESKTOP_PORTAL_BUS_NAME, DESKTOP_PORTAL_OBJECT_PATH},
    email::EmailPortal,
    launcher::{AppLauncher, DesktopEntryLauncher},
    lockdown::{LockdownManager, LockdownPortal, spawn_property_forwarder},
    reload::{ConfigReloader, ConfigTarget},
    settings::{SettingsManager, SettingsPortal, spawn_change_forwarder},
};

/// Errors that stop the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The session bus could not be reached
    #[error("failed to connect to the session bus: {0}")]
    Connection(#[source] zbus::Error),

    /// Requesting or monitoring the bus name failed
    #[error("failed to own {name}: {source}")]
    NameRequest {
        /// Requested well-known name
        name: &'static str,
        /// Underlying bus error
        #[source]
        source: zbus::Error,
    },
}

/// How the service ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Another instance owns the name and does not allow replacement
    NameExists,
    /// The name was taken over by another instance
    NameLost,
    /// The bus connection closed
    Disconnected,
}

/// The portal backend: configuration state, the launcher and the bus
/// plumbing serving them.
pub struct Portal {
    settings: Arc<ConfigReloader<SettingsManager>>,
    lockdown: Arc<ConfigReloader<LockdownManager>>,
    launcher: Arc<dyn AppLauncher>,
}

impl Portal {
    /// Creates the portal around explicit configuration and launcher.
    pub fn new(search_path: SearchPath, launcher: Arc<dyn AppLauncher>) -> Self {
        Self {
            settings: ConfigReloader::new(Arc::new(SettingsManager::new()), search_path.clone()),
            lockdown: ConfigReloader::new(Arc::new(LockdownManager::new()), search_path),
            launcher,
        }
    }

    /// Creates the portal from the XDG environment.
    pub fn from_env() -> Self {
        Self::new(
            SearchPath::from_env(),
            Arc::new(DesktopEntryLauncher::from_env()),
        )
    }

    /// Settings state served by the portal.
    pub fn settings(&self) -> &Arc<SettingsManager> {
        self.settings.target()
    }

    /// Lockdown state served by the portal.
    pub fn lockdown(&self) -> &Arc<LockdownManager> {
        self.lockdown.target()
    }

    /// Runs the initial, silent load of both configuration files.
    ///
    /// A missing or unreadable file leaves the defaults in place.
    pub fn load(&self) {
        initial_load(&self.settings);
        initial_load(&self.lockdown);
    }

    /// Exports every interface on `connection` and starts the tasks that
    /// forward state changes as bus signals.
    ///
    /// An interface that fails to export is skipped.
    pub async fn serve(&self, connection: &Connection) -> Vec<JoinHandle<()>> {
        let mut tasks = Vec::new();

        if export(connection, SettingsPortal::new(self.settings().clone())).await {
            match SignalEmitter::new(connection, DESKTOP_PORTAL_OBJECT_PATH) {
                Ok(emitter) => tasks.push(spawn_change_forwarder(self.settings(), emitter)),
                Err(e) => warn!("Cannot emit SettingChanged: {e}"),
            }
        }

        if export(connection, LockdownPortal::new(self.lockdown().clone())).await {
            match connection
                .object_server()
                .interface::<_, LockdownPortal>(DESKTOP_PORTAL_OBJECT_PATH)
                .await
            {
                Ok(iface) => tasks.push(spawn_property_forwarder(self.lockdown(), iface)),
                Err(e) => warn!("Cannot emit lockdown property changes: {e}"),
            }
        }

        export(connection, AppChooserPortal::new(self.launcher.clone())).await;
        export(connection, EmailPortal::new(self.launcher.clone())).await;

        tasks
    }

    /// Connects to the session bus, serves the portal and owns the bus name
    /// until it is lost.
    ///
    /// # Errors
    /// Returns `ServiceError` if the bus is unreachable or the name request
    /// fails for a reason other than the name being taken.
    #[instrument(skip(self))]
    pub async fn run(&self, replace: bool) -> Result<Shutdown, ServiceError> {
        let connection = Connection::session()
            .await
            .map_err(ServiceError::Connection)?;

        self.load();
        let _tasks = ForwarderTasks(self.serve(&connection).await);

        let name_error = |source: zbus::Error| ServiceError::NameRequest {
            name: DESKTOP_PORTAL_BUS_NAME,
            source,
        };

        let dbus = DBusProxy::new(&connection).await.map_err(name_error)?;
        let mut name_lost = dbus.receive_name_lost().await.map_err(name_error)?;

        let mut flags = RequestNameFlags::AllowReplacement | RequestNameFlags::DoNotQueue;
        if replace {
            flags |= RequestNameFlags::ReplaceExisting;
        }

        match connection
            .request_name_with_flags(DESKTOP_PORTAL_BUS_NAME, flags)
            .await
        {
            Ok(RequestNameReply::PrimaryOwner | RequestNameReply::AlreadyOwner) => {
                info!("Acquired {DESKTOP_PORTAL_BUS_NAME}");
            }
            Ok(RequestNameReply::Exists | RequestNameReply::InQueue) | Err(zbus::Error::NameTaken) => {
                info!("{DESKTOP_PORTAL_BUS_NAME} is owned by another instance");
                return Ok(Shutdown::NameExists);
            }
            Err(e) => return Err(name_error(e)),
        }

        while let Some(signal) = name_lost.next().await {
            let Ok(args) = signal.args() else { continue };

            if args.name().as_str() == DESKTOP_PORTAL_BUS_NAME {
                info!("Lost {DESKTOP_PORTAL_BUS_NAME}, exiting");
                return Ok(Shutdown::NameLost);
            }
        }

        info!("Session bus connection closed");
        Ok(Shutdown::Disconnected)
    }
}

struct ForwarderTasks(Vec<JoinHandle<()>>);

impl Drop for ForwarderTasks {
    fn drop(&mut self) {
        for task in &self.0 {
            task.abort();
        }
    }
}

fn initial_load<T: ConfigTarget>(reloader: &Arc<ConfigReloader<T>>) {
    if reloader.reload(false).is_err() {
        debug!("Using defaults for {}", T::FILE_NAME);
    }
}

async fn export<I: Interface>(connection: &Connection, iface: I) -> bool {
    match connection
        .object_server()
        .at(DESKTOP_PORTAL_OBJECT_PATH, iface)
        .await
    {
        Ok(true) => {
            debug!("Providing implementation for interface: {}", I::name());
            true
        }
        Ok(false) => {
            warn!("{} is already exported", I::name());
            false
        }
        Err(e) => {
            warn!("Failed to export {}: {e}", I::name());
            false
        }
    }
}
