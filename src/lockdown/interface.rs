use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};
use zbus::{interface, object_server::InterfaceRef};

use super::{LockdownFlag, LockdownManager};

/// `org.freedesktop.impl.portal.Lockdown` served from a [`LockdownManager`].
pub struct LockdownPortal {
    manager: Arc<LockdownManager>,
}

impl LockdownPortal {
    /// Wraps a manager for export on the bus.
    pub fn new(manager: Arc<LockdownManager>) -> Self {
        Self { manager }
    }

    fn write(&self, flag: LockdownFlag, disabled: bool) {
        debug!("{} set to {disabled}", flag.binding().property);
        self.manager.set_disabled(flag, disabled);
    }
}

#[interface(name = "org.freedesktop.impl.portal.Lockdown")]
impl LockdownPortal {
    #[zbus(property, name = "disable-printing")]
    async fn disable_printing(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::Printing)
    }

    #[zbus(property, name = "disable-printing")]
    async fn set_disable_printing(&mut self, value: bool) {
        self.write(LockdownFlag::Printing, value);
    }

    #[zbus(property, name = "disable-save-to-disk")]
    async fn disable_save_to_disk(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::SaveToDisk)
    }

    #[zbus(property, name = "disable-save-to-disk")]
    async fn set_disable_save_to_disk(&mut self, value: bool) {
        self.write(LockdownFlag::SaveToDisk, value);
    }

    #[zbus(property, name = "disable-application-handlers")]
    async fn disable_application_handlers(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::ApplicationHandlers)
    }

    #[zbus(property, name = "disable-application-handlers")]
    async fn set_disable_application_handlers(&mut self, value: bool) {
        self.write(LockdownFlag::ApplicationHandlers, value);
    }

    #[zbus(property, name = "disable-location")]
    async fn disable_location(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::Location)
    }

    #[zbus(property, name = "disable-location")]
    async fn set_disable_location(&mut self, value: bool) {
        self.write(LockdownFlag::Location, value);
    }

    #[zbus(property, name = "disable-camera")]
    async fn disable_camera(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::Camera)
    }

    #[zbus(property, name = "disable-camera")]
    async fn set_disable_camera(&mut self, value: bool) {
        self.write(LockdownFlag::Camera, value);
    }

    #[zbus(property, name = "disable-microphone")]
    async fn disable_microphone(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::Microphone)
    }

    #[zbus(property, name = "disable-microphone")]
    async fn set_disable_microphone(&mut self, value: bool) {
        self.write(LockdownFlag::Microphone, value);
    }

    #[zbus(property, name = "disable-sound-output")]
    async fn disable_sound_output(&self) -> bool {
        self.manager.is_disabled(LockdownFlag::SoundOutput)
    }

    #[zbus(property, name = "disable-sound-output")]
    async fn set_disable_sound_output(&mut self, value: bool) {
        self.write(LockdownFlag::SoundOutput, value);
    }
}

async fn emit_changed(
    iface: &InterfaceRef<LockdownPortal>,
    flag: LockdownFlag,
) -> zbus::Result<()> {
    let portal = iface.get().await;
    let emitter = iface.signal_emitter();

    match flag {
        LockdownFlag::Printing => portal.disable_printing_changed(emitter).await,
        LockdownFlag::SaveToDisk => portal.disable_save_to_disk_changed(emitter).await,
        LockdownFlag::ApplicationHandlers => {
            portal.disable_application_handlers_changed(emitter).await
        }
        LockdownFlag::Location => portal.disable_location_changed(emitter).await,
        LockdownFlag::Camera => portal.disable_camera_changed(emitter).await,
        LockdownFlag::Microphone => portal.disable_microphone_changed(emitter).await,
        LockdownFlag::SoundOutput => portal.disable_sound_output_changed(emitter).await,
    }
}

/// Emits `PropertiesChanged` for every exposed property that changes.
///
/// Runs until the manager is dropped.
pub fn spawn_property_forwarder(
    manager: &LockdownManager,
    iface: InterfaceRef<LockdownPortal>,
) -> JoinHandle<()> {
    let mut flags = manager.subscribe();
    let mut last = *flags.borrow_and_update();

    tokio::spawn(async move {
        while flags.changed().await.is_ok() {
            let current = *flags.borrow_and_update();

            for flag in current.changed_from(&last) {
                if let Err(e) = emit_changed(&iface, flag).await {
                    warn!("Failed to emit change of {}: {e}", flag.binding().property);
                }
            }

            last = current;
        }
    })
}
