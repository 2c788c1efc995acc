//! Cancellable live-query subscriptions.
//!
//! A subscription is a channel of full-result-set snapshots, not a callback
//! registration: the backend pushes each [`SnapshotEvent`] into an unbounded
//! channel and the consumer pulls them at its own pace. Errors travel in-band
//! as `Err` events.
//!
//! Teardown is explicit (`cancel`) or implicit (drop). Either way the
//! producer side observes cancellation on its next delivery attempt and
//! prunes the listener; a send to a torn-down consumer is swallowed, never an
//! error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

use crate::{Snapshot, StoreError};

/// One delivery on a subscription: a full snapshot or an in-band error.
pub type SnapshotEvent = Result<Snapshot, StoreError>;

/// Consumer half of a live query.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<SnapshotEvent>,
    cancelled: Arc<AtomicBool>,
}

impl Subscription {
    /// Create a linked producer/consumer pair.
    ///
    /// Backends call this from their `subscribe` implementation, keep the
    /// [`SubscriptionSender`], and hand the `Subscription` to the caller.
    #[must_use]
    pub fn channel() -> (SubscriptionSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        (
            SubscriptionSender {
                tx,
                cancelled: Arc::clone(&cancelled),
            },
            Self { rx, cancelled },
        )
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the stream is exhausted: every event delivered
    /// before teardown has been consumed and no more will arrive.
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is already buffered.
    pub fn try_next(&mut self) -> Option<SnapshotEvent> {
        self.rx.try_recv().ok()
    }

    /// Tear the subscription down.
    ///
    /// No further events are delivered after this returns, even if the
    /// underlying collection keeps changing. Events buffered before
    /// cancellation remain readable.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Producer half of a live query, held by the backend.
#[derive(Debug, Clone)]
pub struct SubscriptionSender {
    tx: mpsc::UnboundedSender<SnapshotEvent>,
    cancelled: Arc<AtomicBool>,
}

impl SubscriptionSender {
    /// Deliver an event to the consumer.
    ///
    /// Returns `false` when the consumer has cancelled or dropped its half;
    /// the backend should then prune this listener.
    pub fn send(&self, event: SnapshotEvent) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.tx.send(event).is_ok()
    }

    /// Whether the consumer has torn the subscription down.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.tx.is_closed()
    }
}
