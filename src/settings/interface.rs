use std::{collections::HashMap, sync::Arc};

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::{debug, warn};
use zbus::{
    interface,
    object_server::SignalEmitter,
    zvariant::{OwnedValue, Value},
};

use super::SettingsManager;
use crate::core::PortalError;

/// `org.freedesktop.impl.portal.Settings` served from a [`SettingsManager`].
pub struct SettingsPortal {
    manager: Arc<SettingsManager>,
}

impl SettingsPortal {
    /// Wraps a manager for export on the bus.
    pub fn new(manager: Arc<SettingsManager>) -> Self {
        Self { manager }
    }
}

#[interface(name = "org.freedesktop.impl.portal.Settings")]
impl SettingsPortal {
    async fn read(&self, namespace: &str, key: &str) -> Result<OwnedValue, PortalError> {
        debug!("Read {namespace} {key}");

        let value = self
            .manager
            .read(namespace, key)
            .map_err(|_| PortalError::NotFound("Requested setting not found".to_string()))?;

        value
            .to_owned_value()
            .map_err(|e| PortalError::Failed(e.to_string()))
    }

    async fn read_all(
        &self,
        namespaces: Vec<String>,
    ) -> Result<HashMap<String, HashMap<String, OwnedValue>>, PortalError> {
        debug!("ReadAll {namespaces:?}");

        let mut result = HashMap::new();

        for (namespace, keys) in self.manager.read_all(&namespaces) {
            let keys = keys
                .into_iter()
                .map(|(key, value)| value.to_owned_value().map(|value| (key, value)))
                .collect::<zbus::zvariant::Result<HashMap<_, _>>>()
                .map_err(|e| PortalError::Failed(e.to_string()))?;

            result.insert(namespace, keys);
        }

        Ok(result)
    }

    /// Emitted once per replaced setting on every reload.
    #[zbus(signal)]
    pub async fn setting_changed(
        emitter: &SignalEmitter<'_>,
        namespace: &str,
        key: &str,
        value: Value<'_>,
    ) -> zbus::Result<()>;
}

/// Forwards change events from `manager` to the `SettingChanged` signal.
///
/// Runs until the manager is dropped.
pub fn spawn_change_forwarder(
    manager: &SettingsManager,
    emitter: SignalEmitter<'static>,
) -> JoinHandle<()> {
    let mut changes = manager.subscribe();

    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => {
                    if let Err(e) = SettingsPortal::setting_changed(
                        &emitter,
                        change.namespace(),
                        change.key(),
                        change.value().to_value(),
                    )
                    .await
                    {
                        warn!("Failed to emit SettingChanged: {e}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Dropped {skipped} setting change notifications");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
