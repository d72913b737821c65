//! xdg-desktop-portal-holo - a backend for xdg-desktop-portal.
//!
//! Serves four `org.freedesktop.impl.portal.*` interfaces on the session bus:
//!
//! - Settings: appearance values read from `settings.conf`, with live reload
//!   and `SettingChanged` notifications
//! - Lockdown: `disable-*` properties read from `lockdown.conf`
//! - AppChooser and Email: forwarded to the Steam URI helper
//!
//! Configuration files are looked up in `SteamOS/portal/` under the XDG
//! config directories, the user's directory first.

/// `org.freedesktop.impl.portal.AppChooser`.
pub mod appchooser;

/// Command-line arguments.
pub mod cli;

/// Configuration search path and loading.
pub mod config;

/// Bus names, object path and the portal error domain.
pub mod core;

/// `org.freedesktop.impl.portal.Email`.
pub mod email;

/// Desktop key-file parsing.
pub mod keyfile;

/// Helper application resolution and launching.
pub mod launcher;

/// `org.freedesktop.impl.portal.Lockdown`.
pub mod lockdown;

/// Service composition and bus name ownership.
pub mod portal;

/// Watchable values.
pub mod property;

/// Live reload of configuration files.
pub mod reload;

/// `org.freedesktop.impl.portal.Request`.
pub mod request;

/// `org.freedesktop.impl.portal.Settings`.
pub mod settings;

/// Logging setup.
pub mod tracing_config;
