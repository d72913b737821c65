//! `org.freedesktop.impl.portal.AppChooser`.
//!
//! Every choice is answered with the URI helper; the candidate list and
//! options sent by the frontend are not consulted.

#[cfg(test)]
mod tests;

use std::{collections::HashMap, sync::Arc};

use tracing::debug;
use zbus::{
    interface,
    object_server::ObjectServer,
    zvariant::{ObjectPath, OwnedValue, Value},
};

use crate::{
    core::{PortalError, PortalResponse},
    launcher::AppLauncher,
    request::Request,
};

/// Picks the application for a `ChooseApplication` call.
///
/// Returns the normalized application id of the helper, or
/// [`PortalResponse::Other`] when none is installed.
pub async fn choose_application(launcher: &dyn AppLauncher) -> (PortalResponse, Option<String>) {
    match launcher.resolve_helper().await {
        Some(app) => (PortalResponse::Success, Some(app.app_id())),
        None => (PortalResponse::Other, None),
    }
}

/// The AppChooser interface.
pub struct AppChooserPortal {
    launcher: Arc<dyn AppLauncher>,
}

impl AppChooserPortal {
    /// Creates the interface around `launcher`.
    pub fn new(launcher: Arc<dyn AppLauncher>) -> Self {
        Self { launcher }
    }
}

#[interface(name = "org.freedesktop.impl.portal.AppChooser")]
impl AppChooserPortal {
    async fn choose_application(
        &self,
        #[zbus(object_server)] server: &ObjectServer,
        handle: ObjectPath<'_>,
        app_id: &str,
        _parent_window: &str,
        _choices: Vec<String>,
        _options: HashMap<String, OwnedValue>,
    ) -> Result<(u32, HashMap<String, OwnedValue>), PortalError> {
        debug!("ChooseApplication for {app_id}");

        // The frontend expects a request object while the call is pending.
        if let Err(e) = Request::export(server, &handle).await {
            debug!("Could not export request {handle}: {e}");
        }
        Request::unexport(server, &handle).await;

        let (response, choice) = choose_application(self.launcher.as_ref()).await;

        let mut results = HashMap::new();
        if let Some(choice) = choice {
            debug!("Chose {choice}");
            let value = OwnedValue::try_from(Value::from(choice))
                .map_err(|e| PortalError::Failed(e.to_string()))?;
            results.insert("choice".to_string(), value);
        }

        Ok((response.into(), results))
    }

    async fn update_choices(
        &self,
        _handle: ObjectPath<'_>,
        _choices: Vec<String>,
    ) -> Result<(), PortalError> {
        Err(PortalError::NotAllowed("Not implemented.".to_string()))
    }
}
