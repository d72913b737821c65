use tokio::sync::watch;

use super::{LockdownFlag, LockdownFlags};
use crate::{keyfile::KeyFile, property::Property, reload::ConfigTarget};

/// Holds the lockdown flags loaded from `lockdown.conf`.
///
/// The initial load replaces the flags silently; every later assignment
/// wakes subscribers if any flag actually changed.
#[derive(Debug)]
pub struct LockdownManager {
    flags: Property<LockdownFlags>,
}

impl Default for LockdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LockdownManager {
    /// Creates a manager with nothing locked down.
    pub fn new() -> Self {
        Self {
            flags: Property::new(LockdownFlags::default()),
        }
    }

    /// Current flags.
    pub fn flags(&self) -> LockdownFlags {
        self.flags.get()
    }

    /// Value of the exposed `disable-*` property for `flag`.
    pub fn is_disabled(&self, flag: LockdownFlag) -> bool {
        self.flags.get().exposed(flag)
    }

    /// Writes the exposed `disable-*` property for `flag`.
    ///
    /// Returns whether anything changed.
    pub fn set_disabled(&self, flag: LockdownFlag, disabled: bool) -> bool {
        self.flags.update(|flags| flags.set_exposed(flag, disabled))
    }

    /// Receiver woken whenever the flags change.
    pub fn subscribe(&self) -> watch::Receiver<LockdownFlags> {
        self.flags.subscribe()
    }
}

impl ConfigTarget for LockdownManager {
    const FILE_NAME: &'static str = "lockdown.conf";

    fn apply(&self, key_file: &KeyFile, notify: bool) {
        let flags = LockdownFlags::from_key_file(key_file);

        if notify {
            self.flags.set(flags);
        } else {
            self.flags.set_silently(flags);
        }
    }
}
