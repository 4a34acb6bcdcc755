//! Replay-latest config store with change notification.
//!
//! `ConfigStore<T>` holds the single live value behind a `watch` channel.
//! Each publish swaps in a freshly allocated `Arc<T>`, so consumers can hold
//! on to the value they saw without blocking the writer, and late
//! subscribers always observe the latest value first.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Stream of every published value, starting with the current one.
pub type ConfigStream<T> = WatchStream<Option<Arc<T>>>;

/// A shared, versioned value with change notification.
///
/// Starts empty (`None`); becomes `Some` on the first [`publish`](Self::publish)
/// and never goes back to `None`.
pub struct ConfigStore<T> {
    inner: Arc<ConfigStoreInner<T>>,
}

struct ConfigStoreInner<T> {
    value_tx: watch::Sender<Option<Arc<T>>>,
    version: AtomicU64,
}

/// Receives notifications when a [`ConfigStore`] is updated.
///
/// Call [`changed()`](ConfigWatcher::changed) to wait for the next update,
/// then [`latest()`](ConfigWatcher::latest) to read it.
pub struct ConfigWatcher<T> {
    value_rx: watch::Receiver<Option<Arc<T>>>,
}

// -- ConfigStore --------------------------------------------------------

impl<T> ConfigStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        let (value_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(ConfigStoreInner {
                value_tx,
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the stored value and notify all watchers.
    ///
    /// Returns the `Arc` that was published.
    pub fn publish(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        // `send_replace` stores the value even when nobody is subscribed.
        self.inner.value_tx.send_replace(Some(Arc::clone(&value)));
        self.inner.version.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// The current value, if one has been published.
    pub fn current(&self) -> Option<Arc<T>> {
        self.inner.value_tx.borrow().clone()
    }

    /// Number of values published so far.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Relaxed)
    }

    /// Subscribe to change notifications.
    ///
    /// The current value counts as already seen.
    pub fn subscribe(&self) -> ConfigWatcher<T> {
        ConfigWatcher {
            value_rx: self.inner.value_tx.subscribe(),
        }
    }

    /// Stream the current value, then every later one.
    pub fn stream(&self) -> ConfigStream<T>
    where
        T: Send + Sync + 'static,
    {
        WatchStream::new(self.inner.value_tx.subscribe())
    }
}

impl<T> Default for ConfigStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ConfigStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// -- ConfigWatcher ------------------------------------------------------

impl<T> ConfigWatcher<T> {
    /// Wait until the store is updated.
    ///
    /// Returns `Ok(())` when a new value is available, or `Err` if the
    /// [`ConfigStore`] has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.value_rx.changed().await
    }

    /// The latest value, marking it as seen.
    pub fn latest(&mut self) -> Option<Arc<T>> {
        self.value_rx.borrow_and_update().clone()
    }
}

impl<T> Clone for ConfigWatcher<T> {
    fn clone(&self) -> Self {
        Self {
            value_rx: self.value_rx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_stream_replays_latest_then_changes() {
        let store = ConfigStore::<u32>::new();
        store.publish(1);

        let mut stream = store.stream();
        assert_eq!(stream.next().await.flatten().as_deref(), Some(&1));

        store.publish(2);
        assert_eq!(stream.next().await.flatten().as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn test_empty_store_replays_none() {
        let store = ConfigStore::<u32>::new();
        let mut stream = store.stream();
        assert_eq!(stream.next().await, Some(None));
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_successive_publishes_are_distinct_allocations() {
        let store = ConfigStore::<u32>::new();
        let first = store.publish(7);
        let second = store.publish(7);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(store.version(), 2);
    }

    #[tokio::test]
    async fn test_watcher_wakes_on_publish() {
        let store = ConfigStore::<&'static str>::new();
        let mut watcher = store.subscribe();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.publish("ready");
        });

        watcher.changed().await.unwrap();
        assert_eq!(watcher.latest().as_deref(), Some(&"ready"));
    }
}
