//! `org.freedesktop.impl.portal.Email`.
//!
//! The helper only accepts a single recipient through a `mailto:` URI, so
//! every other option is decoded but not forwarded.


use std::{collections::HashMap, sync::Arc};

use tracing::{debug, warn};
use zbus::{
    interface,
    zvariant::{Array, ObjectPath, OwnedValue},
};

use crate::{core::PortalResponse, launcher::AppLauncher};

/// Options of a `ComposeEmail` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeEmailOptions {
    /// Single recipient
    pub address: Option<String>,
    /// Recipients
    pub addresses: Option<Vec<String>>,
    /// Carbon-copy recipients
    pub cc: Option<Vec<String>>,
    /// Blind carbon-copy recipients
    pub bcc: Option<Vec<String>>,
    /// Subject line
    pub subject: Option<String>,
    /// Message body
    pub body: Option<String>,
}

impl From<HashMap<String, OwnedValue>> for ComposeEmailOptions {
    fn from(options: HashMap<String, OwnedValue>) -> Self {
        Self {
            address: string_option(&options, "address"),
            addresses: string_list_option(&options, "addresses"),
            cc: string_list_option(&options, "cc"),
            bcc: string_list_option(&options, "bcc"),
            subject: string_option(&options, "subject"),
            body: string_option(&options, "body"),
        }
    }
}

impl ComposeEmailOptions {
    /// The recipient handed to the helper: `address`, else the first of
    /// `addresses`.
    pub fn recipient(&self) -> Option<&str> {
        self.address.as_deref().or_else(|| {
            self.addresses
                .as_ref()
                .and_then(|addresses| addresses.first())
                .map(String::as_str)
        })
    }
}

fn string_option(options: &HashMap<String, OwnedValue>, key: &str) -> Option<String> {
    let value = options.get(key)?;

    match value.downcast_ref::<&str>() {
        Ok(s) => Some(s.to_string()),
        Err(e) => {
            debug!("Ignoring option {key}: {e}");
            None
        }
    }
}

fn string_list_option(options: &HashMap<String, OwnedValue>, key: &str) -> Option<Vec<String>> {
    let value = options.get(key)?;

    let array = match <&Array>::try_from(&**value) {
        Ok(array) => array,
        Err(e) => {
            debug!("Ignoring option {key}: {e}");
            return None;
        }
    };

    Some(
        array
            .iter()
            .filter_map(|item| item.downcast_ref::<&str>().ok().map(str::to_string))
            .collect(),
    )
}

/// Opens the helper with a `mailto:` URI for the chosen recipient.
///
/// Without any recipient the helper is still launched with an empty
/// address.
pub async fn compose_email(
    launcher: &dyn AppLauncher,
    options: &ComposeEmailOptions,
) -> PortalResponse {
    let Some(app) = launcher.resolve_helper().await else {
        return PortalResponse::Other;
    };

    let uri = format!("mailto://{}", options.recipient().unwrap_or_default());
    debug!("Launching {} with {uri}", app.name);

    match launcher.launch_uri(&app, &uri).await {
        Ok(()) => PortalResponse::Success,
        Err(e) => {
            warn!("Failed to launch {}: {e}", app.name);
            PortalResponse::Other
        }
    }
}

/// The Email interface.
pub struct EmailPortal {
    launcher: Arc<dyn AppLauncher>,
}

impl EmailPortal {
    /// Creates the interface around `launcher`.
    pub fn new(launcher: Arc<dyn AppLauncher>) -> Self {
        Self { launcher }
    }
}

#[interface(name = "org.freedesktop.impl.portal.Email")]
impl EmailPortal {
    async fn compose_email(
        &self,
        _handle: ObjectPath<'_>,
        app_id: &str,
        _parent_window: &str,
        options: HashMap<String, OwnedValue>,
    ) -> (u32, HashMap<String, OwnedValue>) {
        debug!("ComposeEmail for {app_id}");

        let options = ComposeEmailOptions::from(options);
        let response = compose_email(self.launcher.as_ref(), &options).await;

        (response.into(), HashMap::new())
    }
}
