//! In-memory document store.
//!
//! The reference backend behind [`DocumentStore`]: collections are nested
//! `BTreeMap`s behind a mutex, and fan-out is synchronous - a mutation
//! delivers the fresh full snapshot to every matching live query before the
//! mutating call returns. That makes test assertions deterministic and gives
//! the demo CLI read-your-writes behavior identical to what a hosted backend
//! pushes asynchronously.
//!
//! The lock is never held across an await point.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::query::{Query, SortDirection, compare_values};
use crate::subscription::{Subscription, SubscriptionSender};
use crate::{Document, DocumentStore, Snapshot, StoreError, is_server_timestamp};

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// In-memory [`DocumentStore`] backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: Collections,
    watchers: Vec<Watcher>,
}

#[derive(Debug)]
struct Watcher {
    query: Query,
    sender: SubscriptionSender,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Split a document path into its parent collection path and document id.
fn split_document(path: &str) -> Result<(&str, &str), StoreError> {
    match path.rsplit_once('/') {
        Some((collection, id)) if !collection.is_empty() && !id.is_empty() => {
            Ok((collection, id))
        }
        _ => Err(StoreError::InvalidRequest(format!(
            "malformed document path: {path}"
        ))),
    }
}

/// Reject write payloads that are not JSON objects.
fn require_object(fields: &Value) -> Result<(), StoreError> {
    if fields.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidRequest(
            "document fields must be a JSON object".to_string(),
        ))
    }
}

/// Replace server-timestamp sentinels with the backend clock.
///
/// One mutation stamps all of its sentinel fields with the same instant.
fn stamp_server_timestamps(fields: &mut Value, now_millis: i64) {
    if let Value::Object(map) = fields {
        for value in map.values_mut() {
            if is_server_timestamp(value) {
                *value = Value::from(now_millis);
            }
        }
    }
}

/// Evaluate a query against the current collections.
///
/// Unsorted results come back in document-id order (the map's iteration
/// order), which keeps snapshots deterministic. A document missing the sort
/// field sorts as null; the sort is stable, so equal keys keep id order.
fn evaluate(collections: &Collections, query: &Query) -> Snapshot {
    let mut docs: Vec<Document> = collections
        .get(&query.collection)
        .into_iter()
        .flat_map(|collection| collection.iter())
        .filter(|(_, fields)| query.matches(fields))
        .map(|(id, fields)| Document {
            id: id.clone(),
            fields: fields.clone(),
        })
        .collect();

    if let Some(sort) = &query.sort {
        docs.sort_by(|a, b| {
            let left = a.fields.get(&sort.field).unwrap_or(&Value::Null);
            let right = b.fields.get(&sort.field).unwrap_or(&Value::Null);
            let ordering = compare_values(left, right);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    Snapshot { docs }
}

/// Push the fresh snapshot to every live query on `collection`.
///
/// Listeners whose consumer has cancelled or dropped are pruned here; a
/// failed delivery is a pruning signal, never an error.
fn notify(inner: &mut Inner, collection: &str) {
    let Inner {
        collections,
        watchers,
    } = inner;

    watchers.retain(|watcher| {
        if watcher.query.collection != collection {
            return !watcher.sender.is_cancelled();
        }
        let snapshot = evaluate(collections, &watcher.query);
        watcher.sender.send(Ok(snapshot))
    });
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str) -> Result<Snapshot, StoreError> {
        let inner = self.lock();
        Ok(evaluate(&inner.collections, &Query::collection(collection)))
    }

    async fn add(&self, collection: &str, mut fields: Value) -> Result<String, StoreError> {
        require_object(&fields)?;
        stamp_server_timestamps(&mut fields, Utc::now().timestamp_millis());

        let id = Uuid::new_v4().simple().to_string();
        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        debug!(collection, id, "document added");
        notify(&mut inner, collection);
        Ok(id)
    }

    async fn set(&self, document: &str, mut fields: Value) -> Result<(), StoreError> {
        require_object(&fields)?;
        let (collection, id) = split_document(document)?;
        stamp_server_timestamps(&mut fields, Utc::now().timestamp_millis());

        let mut inner = self.lock();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        debug!(document, "document set");
        notify(&mut inner, collection);
        Ok(())
    }

    async fn update(&self, document: &str, mut fields: Value) -> Result<(), StoreError> {
        require_object(&fields)?;
        let (collection, id) = split_document(document)?;
        stamp_server_timestamps(&mut fields, Utc::now().timestamp_millis());

        let mut inner = self.lock();
        let existing = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(document.to_string()))?;

        if let (Value::Object(target), Value::Object(patch)) = (existing, fields) {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        debug!(document, "document updated");
        notify(&mut inner, collection);
        Ok(())
    }

    async fn delete(&self, document: &str) -> Result<(), StoreError> {
        let (collection, id) = split_document(document)?;

        let mut inner = self.lock();
        let removed = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.remove(id))
            .is_some();

        if removed {
            debug!(document, "document deleted");
            notify(&mut inner, collection);
        }
        Ok(())
    }

    async fn batch_delete(&self, documents: &[String]) -> Result<(), StoreError> {
        // Validate every path before touching anything: all or nothing.
        let targets = documents
            .iter()
            .map(|path| split_document(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut inner = self.lock();
        let mut touched = BTreeSet::new();
        for (collection, id) in targets {
            let removed = inner
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.remove(id))
                .is_some();
            if removed {
                touched.insert(collection.to_string());
            }
        }
        debug!(count = documents.len(), "batch delete committed");

        // One snapshot per touched collection, after all removals: listeners
        // observe the batch as a single transition.
        for collection in touched {
            notify(&mut inner, &collection);
        }
        Ok(())
    }

    async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError> {
        let (sender, subscription) = Subscription::channel();

        let mut inner = self.lock();
        let initial = evaluate(&inner.collections, &query);
        debug!(collection = %query.collection, docs = initial.len(), "live query attached");
        sender.send(Ok(initial));
        inner.watchers.push(Watcher { query, sender });
        Ok(subscription)
    }
}
