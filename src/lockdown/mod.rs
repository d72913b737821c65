//! Lockdown and privacy switches exposed through
//! `org.freedesktop.impl.portal.Lockdown`.
//!
//! `lockdown.conf` names what to lock down; the bus exposes each switch as a
//! read-write `disable-*` property.

mod flags;
mod interface;
mod manager;

#[cfg(test)]
mod tests;

pub use flags::{FLAG_BINDINGS, FlagBinding, LockdownFlag, LockdownFlags};
pub use interface::{LockdownPortal, spawn_property_forwarder};
pub use manager::LockdownManager;
