use std::fmt::{self, Debug};

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A value that can be watched for changes.
///
/// Watchers are only woken when an assignment actually changes the value.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Set a new value, notifying watchers if it differs from the current one.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, new_value: T) -> bool
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current != new_value {
                *current = new_value;
                true
            } else {
                false
            }
        })
    }

    /// Replace the value without waking any watcher.
    pub fn set_silently(&self, new_value: T) {
        self.tx.send_if_modified(|current| {
            *current = new_value;
            false
        });
    }

    /// Apply `f` to the current value, notifying watchers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool
    where
        T: PartialEq,
    {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Receiver that observes every notifying assignment.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes.
    pub fn watch(&self) -> impl Stream<Item = T> + Send {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::Property;

    #[test]
    fn set_reports_whether_value_changed() {
        let property = Property::new(1);

        assert!(!property.set(1));
        assert!(property.set(2));
        assert_eq!(property.get(), 2);
    }

    #[tokio::test]
    async fn silent_assignment_does_not_wake_watchers() {
        let property = Property::new(false);
        let mut rx = property.subscribe();

        property.set_silently(true);
        assert!(!rx.has_changed().unwrap());
        assert!(property.get());

        property.update(|value| *value = false);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn watch_yields_current_then_changes() {
        let property = Property::new(1);
        let mut values = Box::pin(property.watch());

        assert_eq!(values.next().await, Some(1));

        property.set(2);
        assert_eq!(values.next().await, Some(2));
    }
}
