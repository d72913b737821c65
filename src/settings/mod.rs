//! Appearance settings exposed through `org.freedesktop.impl.portal.Settings`.
//!
//! Settings are loaded from `settings.conf`, kept in a namespace/key store
//! and queried with namespace glob patterns. Reloads replace every entry and
//! emit one `SettingChanged` per replaced key.

mod interface;
mod manager;
mod store;
mod value;


pub use interface::{SettingsPortal, spawn_change_forwarder};
pub use manager::{APPEARANCE_NAMESPACE, NamespaceMap, SettingsError, SettingsManager};
pub use store::{NamespaceTable, SettingsStore, namespace_matches};
pub use value::{Color, SettingValue, TypedValue};
