use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, instrument};

use super::{Color, SettingValue, SettingsStore, TypedValue};
use crate::{
    keyfile::{KeyFile, KeyFileError},
    reload::ConfigTarget,
};

/// Namespace of the appearance settings.
pub const APPEARANCE_NAMESPACE: &str = "org.freedesktop.appearance";

const COLOR_SCHEME_KEY: &str = "color-scheme";
const CONTRAST_KEY: &str = "contrast";
const ACCENT_COLOR_KEY: &str = "accent-color";

/// Errors returned by settings queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// No setting exists at the namespace/key pair.
    #[error("setting '{namespace}' '{key}' not found")]
    NotFound {
        /// Requested namespace
        namespace: String,
        /// Requested key
        key: String,
    },
}

/// Settings grouped by namespace, as returned by [`SettingsManager::read_all`].
pub type NamespaceMap = HashMap<String, HashMap<String, SettingValue>>;

/// Owns the settings store and publishes change events.
///
/// Queries are answered purely from memory. The store is replaced only by
/// [`ConfigTarget::apply`], which holds the write lock for the whole
/// repopulation so a query never sees a half-applied reload.
pub struct SettingsManager {
    store: RwLock<SettingsStore>,
    changes: broadcast::Sender<TypedValue>,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Creates a manager with an empty store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);

        Self {
            store: RwLock::new(SettingsStore::new()),
            changes,
        }
    }

    /// Looks up one setting.
    ///
    /// # Errors
    /// Returns `SettingsError::NotFound` if the namespace or key is unknown.
    #[instrument(skip(self))]
    pub fn read(&self, namespace: &str, key: &str) -> Result<SettingValue, SettingsError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);

        store
            .get(namespace, key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                debug!("Attempted to read unknown namespace/key pair: {namespace} {key}");
                SettingsError::NotFound {
                    namespace: namespace.to_string(),
                    key: key.to_string(),
                }
            })
    }

    /// Returns every namespace matching any of `patterns`, with all its keys.
    ///
    /// An empty pattern list returns every namespace.
    pub fn read_all<S: AsRef<str>>(&self, patterns: &[S]) -> NamespaceMap {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);

        store
            .matching(patterns)
            .map(|table| {
                let keys = table
                    .entries()
                    .map(|entry| (entry.key().to_string(), entry.value().clone()))
                    .collect();
                (table.namespace().to_string(), keys)
            })
            .collect()
    }

    /// Subscribes to change events.
    ///
    /// One event is sent per replaced entry on every notifying reload.
    pub fn subscribe(&self) -> broadcast::Receiver<TypedValue> {
        self.changes.subscribe()
    }

    /// Stores `values`, returning the ones that replaced an existing entry.
    fn store_all(&self, values: Vec<TypedValue>) -> Vec<TypedValue> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);

        values
            .into_iter()
            .filter_map(|value| store.set(value.clone()).then_some(value))
            .collect()
    }
}

impl ConfigTarget for SettingsManager {
    const FILE_NAME: &'static str = "settings.conf";

    fn apply(&self, key_file: &KeyFile, notify: bool) {
        let values: Vec<TypedValue> = key_file
            .groups()
            .filter(|group| *group == APPEARANCE_NAMESPACE)
            .flat_map(|group| appearance_settings(key_file, group))
            .collect();

        let replaced = self.store_all(values);

        if !notify {
            return;
        }

        for value in replaced {
            debug!("Setting changed: {} {}", value.namespace(), value.key());
            let _ = self.changes.send(value);
        }
    }
}

fn appearance_settings(key_file: &KeyFile, group: &str) -> Vec<TypedValue> {
    let color_scheme = or_default(key_file.integer(group, COLOR_SCHEME_KEY));
    let contrast = or_default(key_file.integer(group, CONTRAST_KEY));
    let accent_color = or_default(key_file.double_list(group, ACCENT_COLOR_KEY));

    [
        (COLOR_SCHEME_KEY, SettingValue::Integer(color_scheme)),
        (CONTRAST_KEY, SettingValue::Integer(contrast)),
        (
            ACCENT_COLOR_KEY,
            SettingValue::Color(Color::from_channels(&accent_color)),
        ),
    ]
    .into_iter()
    .filter_map(|(key, value)| TypedValue::new(APPEARANCE_NAMESPACE, key, value))
    .collect()
}

fn or_default<T: Default>(result: Result<T, KeyFileError>) -> T {
    result.unwrap_or_else(|e| {
        if !e.is_not_found() {
            debug!("Using default: {e}");
        }
        T::default()
    })
}
