//! Replay-latest value streams.
//!
//! # Responsibility
//! - Provide the observable primitive backing the repository's note
//!   streams and the session's visible-strokes stream.
//!
//! # Contract
//! - A new subscription immediately receives the latest published value,
//!   then every subsequent publish in order.
//! - Dropped subscriptions are pruned on the next publish.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};

/// Observable cell holding the latest value and fanning out updates.
pub struct Subject<T: Clone> {
    inner: Mutex<SubjectInner<T>>,
}

struct SubjectInner<T> {
    latest: T,
    subscribers: Vec<Sender<T>>,
}

impl<T: Clone> Subject<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(SubjectInner {
                latest: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Returns a clone of the latest value.
    pub fn latest(&self) -> T {
        self.lock().latest.clone()
    }

    /// Publishes a new value to current subscribers and stores it as the
    /// replay value for future subscribers.
    pub fn publish(&self, value: T) {
        let mut inner = self.lock();
        inner.latest = value.clone();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
    }

    /// Opens a subscription that replays the latest value first.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = channel();
        let mut inner = self.lock();
        // Replay cannot fail: the receiver is still in scope here.
        let _ = tx.send(inner.latest.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    fn lock(&self) -> MutexGuard<'_, SubjectInner<T>> {
        // A poisoned subject still holds a coherent last value; writes are
        // whole-value replacements.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Receiving end of a `Subject` stream.
pub struct Subscription<T> {
    rx: Receiver<T>,
}

impl<T> Subscription<T> {
    /// Blocks for the next value; `None` once the subject is gone.
    pub fn next(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Returns a pending value without blocking.
    pub fn try_next(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}
