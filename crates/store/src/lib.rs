//! Remote document-store boundary.
//!
//! # Architecture
//!
//! The remote store is the sole source of truth for every collection the
//! client renders. This crate defines the contract the rest of the workspace
//! programs against:
//!
//! - [`DocumentStore`] - the async store interface: one-shot reads, document
//!   writes, an atomic batch delete, and standing live queries
//! - [`Query`] - collection path plus optional equality filter and sort
//! - [`Subscription`] - a cancellable handle yielding full-result-set
//!   snapshots over a channel (never diffs)
//! - [`LiveQuery`] - a typed mirror that decodes each snapshot and replaces
//!   its contents atomically
//! - [`MemoryStore`] - the in-process reference backend used by the demo CLI
//!   and the test suites
//!
//! # Consistency model
//!
//! Writes are last-writer-wins: no read-before-write, no concurrency token.
//! A live query re-delivers the full matching result set on every relevant
//! change, whether caused by this client or another; the only read-your-writes
//! guarantee is the self-triggered snapshot. Subscription errors are delivered
//! in-band and are not retried here - re-subscribing is the caller's decision.
//!
//! # Example
//!
//! ```rust,ignore
//! use greenbasket_store::{DocumentStore, MemoryStore, Query, server_timestamp};
//! use serde_json::json;
//!
//! let store = MemoryStore::new();
//! store.add("products", json!({"name": "Apple", "price": 2.5})).await?;
//!
//! let mut sub = store.subscribe(Query::collection("products")).await?;
//! let snapshot = sub.next().await.expect("initial snapshot")?;
//! assert_eq!(snapshot.len(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod live;
pub mod memory;
pub mod query;
pub mod subscription;

pub use live::LiveQuery;
pub use memory::MemoryStore;
pub use query::{Filter, Query, Sort, SortDirection};
pub use subscription::{SnapshotEvent, Subscription, SubscriptionSender};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the document-store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A write payload was not a JSON object, or a path was malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The caller is not permitted to perform the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The backend reported a failure (network loss, outage, ...).
    #[error("backend error: {0}")]
    Backend(String),

    /// A snapshot document did not decode into the expected type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The subscription's event stream ended.
    #[error("subscription closed")]
    SubscriptionClosed,
}

/// A document as delivered in a snapshot: id plus stored fields.
///
/// The id is the document's address within its collection; it is not stored
/// in the field map itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id.
    pub id: String,
    /// Stored fields (always a JSON object).
    pub fields: Value,
}

/// The full result set of a query at a point in time.
///
/// Every snapshot is complete and consistent-at-a-point-in-time; consumers
/// replace their mirror wholesale rather than patching it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// Matching documents, in query order.
    pub docs: Vec<Document>,
}

impl Snapshot {
    /// Number of documents in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// The remote document-store contract.
///
/// Object-safe so engines can hold `Arc<dyn DocumentStore>` and backends can
/// be swapped (hosted service, in-memory, fault-injecting test double).
///
/// Collection paths are slash-separated with an odd number of segments
/// (`products`, `carts/u1/items`); document paths append the document id.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// One-shot read of a whole collection.
    async fn get(&self, collection: &str) -> Result<Snapshot, StoreError>;

    /// Create a document with a store-assigned id. Returns the new id.
    async fn add(&self, collection: &str, fields: Value) -> Result<String, StoreError>;

    /// Full overwrite of a document, creating it if absent.
    async fn set(&self, document: &str, fields: Value) -> Result<(), StoreError>;

    /// Shallow merge of fields into an existing document.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, document: &str, fields: Value) -> Result<(), StoreError>;

    /// Delete a document. Deleting an absent document is a no-op.
    async fn delete(&self, document: &str) -> Result<(), StoreError>;

    /// Delete every listed document atomically: either all of them are
    /// removed or none are. Atomic for the listed paths only.
    async fn batch_delete(&self, documents: &[String]) -> Result<(), StoreError>;

    /// Open a standing live query.
    ///
    /// The first event is the full current result set; every subsequent
    /// matching change re-delivers the full result set. The subscription
    /// keeps consuming change events until it is cancelled or dropped.
    async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError>;
}

/// Sentinel field name for server-assigned timestamps.
const SERVER_TIMESTAMP_KEY: &str = "$serverTimestamp";

/// Sentinel value a writer stores to request a server-assigned timestamp.
///
/// The backend replaces the sentinel with its own clock (epoch milliseconds)
/// at commit time, so untrusted client clocks never enter ordering-sensitive
/// fields like `createdAt`.
#[must_use]
pub fn server_timestamp() -> Value {
    serde_json::json!({ SERVER_TIMESTAMP_KEY: true })
}

/// Whether a value is the server-timestamp sentinel.
#[must_use]
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.len() == 1 && map.get(SERVER_TIMESTAMP_KEY).is_some())
}
