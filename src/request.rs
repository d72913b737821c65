//! The per-call `org.freedesktop.impl.portal.Request` object.

use tracing::debug;
use zbus::{Connection, interface, object_server::ObjectServer, zvariant::ObjectPath};

/// Handle exported at the request path for the duration of a portal call.
///
/// The frontend may call `Close` on it; nothing interactive is ever shown by
/// this backend, so closing only unexports the object.
pub struct Request {
    handle: String,
}

impl Request {
    /// Creates the request object for `handle`.
    pub fn new(handle: &ObjectPath<'_>) -> Self {
        Self {
            handle: handle.to_string(),
        }
    }

    /// Exports a request at `handle`.
    ///
    /// Returns whether the object was added; an object already present at
    /// the path is left untouched.
    ///
    /// # Errors
    /// Returns an error if the path cannot be registered.
    pub async fn export(server: &ObjectServer, handle: &ObjectPath<'_>) -> zbus::Result<bool> {
        server.at(handle.clone(), Self::new(handle)).await
    }

    /// Unexports the request at `handle`, ignoring an already-closed one.
    pub async fn unexport(server: &ObjectServer, handle: &ObjectPath<'_>) {
        if let Err(e) = server.remove::<Self, _>(handle.clone()).await {
            debug!("Request {handle} already gone: {e}");
        }
    }
}

#[interface(name = "org.freedesktop.impl.portal.Request")]
impl Request {
    async fn close(&self, #[zbus(connection)] connection: &Connection) {
        debug!("Closing request {}", self.handle);

        let connection = connection.clone();
        let handle = self.handle.clone();

        // Removal runs outside this call so it does not wait on itself.
        tokio::spawn(async move {
            if let Ok(path) = ObjectPath::try_from(handle.as_str()) {
                Self::unexport(connection.object_server(), &path).await;
            }
        });
    }
}
