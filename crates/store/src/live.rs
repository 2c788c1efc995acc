//! Typed mirrors over live queries.
//!
//! A [`LiveQuery`] owns a subscription and a decoded mirror of the latest
//! snapshot. Each delivery replaces the mirror wholesale - there is no
//! incremental patching, so the mirror is always a complete
//! consistent-at-a-point-in-time view, never a partial merge. The mirror is
//! disposable: its lifetime is bound to the scope that attached it, and the
//! remote store remains the source of truth throughout.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::query::Query;
use crate::subscription::Subscription;
use crate::{DocumentStore, Snapshot, StoreError};

/// A live query whose snapshots decode into `T`.
///
/// `attach` opens the subscription; the first call to [`changed`] consumes
/// the initial snapshot. Cancellation happens explicitly via [`cancel`] or
/// implicitly when the mirror is dropped.
///
/// [`changed`]: LiveQuery::changed
/// [`cancel`]: LiveQuery::cancel
#[derive(Debug)]
pub struct LiveQuery<T> {
    subscription: Subscription,
    items: Vec<T>,
}

impl<T: DeserializeOwned> LiveQuery<T> {
    /// Open a live query against `store`.
    ///
    /// # Errors
    ///
    /// Returns any error the store raises while establishing the
    /// subscription.
    pub async fn attach(store: &dyn DocumentStore, query: Query) -> Result<Self, StoreError> {
        let subscription = store.subscribe(query).await?;
        Ok(Self {
            subscription,
            items: Vec::new(),
        })
    }

    /// Wait for the next snapshot and replace the mirror with it.
    ///
    /// # Errors
    ///
    /// In-band subscription errors (permission denial, network loss) and
    /// decode failures surface here; the mirror keeps its previous contents
    /// in that case. [`StoreError::SubscriptionClosed`] means the stream
    /// ended and no further snapshots will arrive.
    pub async fn changed(&mut self) -> Result<&[T], StoreError> {
        match self.subscription.next().await {
            Some(Ok(snapshot)) => {
                self.items = decode_snapshot(&snapshot)?;
                Ok(&self.items)
            }
            Some(Err(err)) => Err(err),
            None => Err(StoreError::SubscriptionClosed),
        }
    }

    /// Apply an already-buffered snapshot, if any, without waiting.
    ///
    /// Returns `Ok(true)` when the mirror was replaced.
    ///
    /// # Errors
    ///
    /// Same as [`LiveQuery::changed`].
    pub fn poll_changed(&mut self) -> Result<bool, StoreError> {
        match self.subscription.try_next() {
            Some(Ok(snapshot)) => {
                self.items = decode_snapshot(&snapshot)?;
                Ok(true)
            }
            Some(Err(err)) => Err(err),
            None => Ok(false),
        }
    }

    /// The current mirror contents.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Tear down the subscription. The mirror keeps its last contents but
    /// will never change again.
    pub fn cancel(&mut self) {
        self.subscription.cancel();
    }
}

/// Decode a snapshot into typed items, injecting each document's id under the
/// `id` key the way the read models expect.
///
/// # Errors
///
/// Fails on the first document that does not decode; the caller keeps its
/// previous mirror rather than accepting a partial one.
pub fn decode_snapshot<T: DeserializeOwned>(snapshot: &Snapshot) -> Result<Vec<T>, StoreError> {
    snapshot
        .docs
        .iter()
        .map(|doc| {
            let mut fields = doc.fields.clone();
            if let Value::Object(map) = &mut fields {
                map.insert("id".to_string(), Value::String(doc.id.clone()));
            }
            serde_json::from_value(fields).map_err(StoreError::from)
        })
        .collect()
}
