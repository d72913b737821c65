use zbus::DBusError;

/// Object path every portal interface is served at.
pub const DESKTOP_PORTAL_OBJECT_PATH: &str = "/org/freedesktop/portal/desktop";

/// Well-known bus name of this backend.
pub const DESKTOP_PORTAL_BUS_NAME: &str = "org.freedesktop.impl.portal.desktop.holo";

/// Errors returned to portal callers over D-Bus.
///
/// Names follow the `org.freedesktop.portal.Error` domain used by
/// xdg-desktop-portal.
#[derive(DBusError, Debug)]
#[zbus(prefix = "org.freedesktop.portal.Error")]
pub enum PortalError {
    /// Transport error
    #[zbus(error)]
    ZBus(zbus::Error),
    /// Generic failure
    Failed(String),
    /// A request argument was invalid
    InvalidArgument(String),
    /// The requested item does not exist
    NotFound(String),
    /// The item already exists
    Exists(String),
    /// The operation is not permitted
    NotAllowed(String),
    /// The user cancelled the request
    Cancelled(String),
    /// The parent window went away
    WindowDestroyed(String),
}

/// Response code of a portal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PortalResponse {
    /// The request completed
    Success = 0,
    /// The user cancelled the interaction
    Cancelled = 1,
    /// The request ended some other way, including failure
    Other = 2,
}

impl From<PortalResponse> for u32 {
    fn from(response: PortalResponse) -> Self {
        response as u32
    }
}
