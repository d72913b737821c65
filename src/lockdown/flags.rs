use tracing::debug;

use crate::keyfile::KeyFile;

const LOCKDOWN_GROUP: &str = "Lockdown";
const PRIVACY_GROUP: &str = "Privacy";

/// A capability that can be locked down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockdownFlag {
    /// Printing documents
    Printing,
    /// Saving files to disk
    SaveToDisk,
    /// Choosing application handlers
    ApplicationHandlers,
    /// Location services
    Location,
    /// Camera access
    Camera,
    /// Microphone access
    Microphone,
    /// Sound output
    SoundOutput,
}

/// How one flag maps between `lockdown.conf` and the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagBinding {
    /// The capability
    pub flag: LockdownFlag,
    /// Group holding the config key
    pub group: &'static str,
    /// Config key; `true` means "lock this down"
    pub key: &'static str,
    /// Exposed `disable-*` property name
    pub property: &'static str,
    /// Whether the exposed property is the negation of the capability
    pub invert: bool,
}

/// Every lockdown flag with its config key and exposed property.
pub static FLAG_BINDINGS: [FlagBinding; 7] = [
    FlagBinding {
        flag: LockdownFlag::Printing,
        group: LOCKDOWN_GROUP,
        key: "Printing",
        property: "disable-printing",
        invert: true,
    },
    FlagBinding {
        flag: LockdownFlag::SaveToDisk,
        group: LOCKDOWN_GROUP,
        key: "SaveToDisk",
        property: "disable-save-to-disk",
        invert: true,
    },
    FlagBinding {
        flag: LockdownFlag::ApplicationHandlers,
        group: LOCKDOWN_GROUP,
        key: "ApplicationHandlers",
        property: "disable-application-handlers",
        invert: true,
    },
    FlagBinding {
        flag: LockdownFlag::Location,
        group: LOCKDOWN_GROUP,
        key: "Location",
        property: "disable-location",
        invert: true,
    },
    FlagBinding {
        flag: LockdownFlag::Camera,
        group: PRIVACY_GROUP,
        key: "Camera",
        property: "disable-camera",
        invert: true,
    },
    FlagBinding {
        flag: LockdownFlag::Microphone,
        group: PRIVACY_GROUP,
        key: "Microphone",
        property: "disable-microphone",
        invert: true,
    },
    FlagBinding {
        flag: LockdownFlag::SoundOutput,
        group: PRIVACY_GROUP,
        key: "SoundOutput",
        property: "disable-sound-output",
        invert: true,
    },
];

impl LockdownFlag {
    /// The binding describing this flag.
    pub fn binding(self) -> &'static FlagBinding {
        match self {
            LockdownFlag::Printing => &FLAG_BINDINGS[0],
            LockdownFlag::SaveToDisk => &FLAG_BINDINGS[1],
            LockdownFlag::ApplicationHandlers => &FLAG_BINDINGS[2],
            LockdownFlag::Location => &FLAG_BINDINGS[3],
            LockdownFlag::Camera => &FLAG_BINDINGS[4],
            LockdownFlag::Microphone => &FLAG_BINDINGS[5],
            LockdownFlag::SoundOutput => &FLAG_BINDINGS[6],
        }
    }
}

/// Capability state, `true` meaning the capability is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockdownFlags {
    /// Printing allowed
    pub printing: bool,
    /// Saving to disk allowed
    pub save_to_disk: bool,
    /// Application handlers allowed
    pub application_handlers: bool,
    /// Location allowed
    pub location: bool,
    /// Camera allowed
    pub camera: bool,
    /// Microphone allowed
    pub microphone: bool,
    /// Sound output allowed
    pub sound_output: bool,
}

impl Default for LockdownFlags {
    fn default() -> Self {
        Self {
            printing: true,
            save_to_disk: true,
            application_handlers: true,
            location: true,
            camera: true,
            microphone: true,
            sound_output: true,
        }
    }
}

impl LockdownFlags {
    /// Reads every bound key; a missing or invalid key means "not locked".
    pub fn from_key_file(key_file: &KeyFile) -> Self {
        let mut flags = Self::default();

        for binding in &FLAG_BINDINGS {
            let locked = key_file
                .boolean(binding.group, binding.key)
                .unwrap_or_else(|e| {
                    if !e.is_not_found() {
                        debug!("Treating {}.{} as false: {e}", binding.group, binding.key);
                    }
                    false
                });

            flags.set_exposed(binding.flag, locked);
        }

        flags
    }

    /// Whether the capability is allowed.
    pub fn get(&self, flag: LockdownFlag) -> bool {
        match flag {
            LockdownFlag::Printing => self.printing,
            LockdownFlag::SaveToDisk => self.save_to_disk,
            LockdownFlag::ApplicationHandlers => self.application_handlers,
            LockdownFlag::Location => self.location,
            LockdownFlag::Camera => self.camera,
            LockdownFlag::Microphone => self.microphone,
            LockdownFlag::SoundOutput => self.sound_output,
        }
    }

    /// Allows or forbids the capability.
    pub fn set(&mut self, flag: LockdownFlag, allowed: bool) {
        let slot = match flag {
            LockdownFlag::Printing => &mut self.printing,
            LockdownFlag::SaveToDisk => &mut self.save_to_disk,
            LockdownFlag::ApplicationHandlers => &mut self.application_handlers,
            LockdownFlag::Location => &mut self.location,
            LockdownFlag::Camera => &mut self.camera,
            LockdownFlag::Microphone => &mut self.microphone,
            LockdownFlag::SoundOutput => &mut self.sound_output,
        };
        *slot = allowed;
    }

    /// Value of the flag's exposed property.
    pub fn exposed(&self, flag: LockdownFlag) -> bool {
        self.get(flag) ^ flag.binding().invert
    }

    /// Sets the flag from a write to its exposed property.
    pub fn set_exposed(&mut self, flag: LockdownFlag, value: bool) {
        self.set(flag, value ^ flag.binding().invert);
    }

    /// Flags whose exposed value differs between `self` and `other`.
    pub fn changed_from(&self, other: &Self) -> Vec<LockdownFlag> {
        FLAG_BINDINGS
            .iter()
            .map(|binding| binding.flag)
            .filter(|flag| self.exposed(*flag) != other.exposed(*flag))
            .collect()
    }
}
