//! Layered lookup of the portal configuration files.
//!
//! Files live in `SteamOS/portal/` under the XDG config directories. The
//! user directory overrides the system ones and only one layer is ever read.

mod error;
mod loader;
mod paths;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::{LoadedConfig, resolve_and_parse};
pub use paths::{DataPaths, SearchPath};
