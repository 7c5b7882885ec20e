//! Bounded multi-producer, multi-consumer queue.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

/// Errors returned by queue operations.
#[derive(Debug, Error)]
pub enum QueueError<T> {
    /// Every receiver is gone; the unsent item is handed back.
    #[error("queue closed: no receiver is listening")]
    Closed(T),
}

impl<T> QueueError<T> {
    /// Recover the item that could not be sent.
    pub fn into_inner(self) -> T {
        match self {
            QueueError::Closed(item) => item,
        }
    }
}

/// Create a bounded queue holding at most `capacity` items.
///
/// A capacity of zero is lifted to one so an empty batch still gets a usable
/// queue.
pub fn bounded<T>(capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        QueueSender { inner: tx },
        QueueReceiver {
            inner: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Writing half of a bounded queue.
#[derive(Debug)]
pub struct QueueSender<T> {
    inner: mpsc::Sender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Push an item, suspending while the queue is full.
    pub async fn send(&self, item: T) -> Result<(), QueueError<T>> {
        self.inner
            .send(item)
            .await
            .map_err(|mpsc::error::SendError(item)| QueueError::Closed(item))
    }

    /// Signal that this handle will send nothing more.
    ///
    /// Receivers observe the queue as closed once the last handle is closed
    /// and the buffer is drained.
    pub fn close(self) {
        drop(self);
    }

    /// Maximum number of buffered items.
    pub fn capacity(&self) -> usize {
        self.inner.max_capacity()
    }

    /// True when every receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

/// Reading half of a bounded queue.
///
/// Clones share the same underlying receiver: every item is delivered to
/// exactly one of them.
#[derive(Debug)]
pub struct QueueReceiver<T> {
    inner: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for QueueReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> QueueReceiver<T> {
    /// Pull the next item.
    ///
    /// Returns `None` once the queue is closed and drained.
    pub async fn recv(&self) -> Option<T> {
        self.inner.lock().await.recv().await
    }

    /// Pull exactly `n` items.
    ///
    /// Fewer than `n` items come back only if the queue closes first. The
    /// receiver is held for the whole call, so other clones wait.
    pub async fn recv_exact(&self, n: usize) -> Vec<T> {
        let mut items = Vec::with_capacity(n);
        let mut rx = self.inner.lock().await;
        while items.len() < n {
            match rx.recv().await {
                Some(item) => items.push(item),
                None => break,
            }
        }
        items
    }
}
