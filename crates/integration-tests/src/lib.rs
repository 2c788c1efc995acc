//! Integration test support for GreenBasket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greenbasket-integration-tests
//! ```
//!
//! Everything runs against the in-memory backend; no external services are
//! required. [`FlakyStore`] wraps it with deterministic fault injection so
//! the partial-failure contracts (checkout's order-create / cart-clear
//! split in particular) are observable from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use greenbasket_admin::ProductAdmin;
use greenbasket_core::{Product, ProductDraft, ProductId};
use greenbasket_store::{
    DocumentStore, LiveQuery, MemoryStore, Query, Snapshot, StoreError, Subscription,
};

/// An in-memory store with switchable failure points.
///
/// Faults are injected at the boundary, exactly where a hosted backend would
/// fail, so the engines under test cannot tell the difference between an
/// injected failure and a real one.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_add: AtomicBool,
    fail_batch_delete: AtomicBool,
}

impl FlakyStore {
    /// Create a store with no faults armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm or clear failure of every subsequent `add`.
    pub fn set_add_failure(&self, fail: bool) {
        self.fail_add.store(fail, Ordering::SeqCst);
    }

    /// Arm or clear failure of every subsequent `batch_delete`.
    pub fn set_batch_delete_failure(&self, fail: bool) {
        self.fail_batch_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get(&self, collection: &str) -> Result<Snapshot, StoreError> {
        self.inner.get(collection).await
    }

    async fn add(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected add failure".to_string()));
        }
        self.inner.add(collection, fields).await
    }

    async fn set(&self, document: &str, fields: Value) -> Result<(), StoreError> {
        self.inner.set(document, fields).await
    }

    async fn update(&self, document: &str, fields: Value) -> Result<(), StoreError> {
        self.inner.update(document, fields).await
    }

    async fn delete(&self, document: &str) -> Result<(), StoreError> {
        self.inner.delete(document).await
    }

    async fn batch_delete(&self, documents: &[String]) -> Result<(), StoreError> {
        if self.fail_batch_delete.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(
                "injected batch-delete failure".to_string(),
            ));
        }
        self.inner.batch_delete(documents).await
    }

    async fn subscribe(&self, query: Query) -> Result<Subscription, StoreError> {
        self.inner.subscribe(query).await
    }
}

/// Shared context for scenario tests: a fault-injectable store plus seeding
/// helpers.
pub struct TestContext {
    store: Arc<FlakyStore>,
}

impl TestContext {
    /// Create a context with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(FlakyStore::new()),
        }
    }

    /// The store with its fault switches accessible.
    #[must_use]
    pub fn flaky(&self) -> &FlakyStore {
        &self.store
    }

    /// The store as the engines see it.
    #[must_use]
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store) as Arc<dyn DocumentStore>
    }

    /// Seed the catalog through the admin engine. Returns the assigned ids.
    ///
    /// # Panics
    ///
    /// Panics if a draft is invalid or the store rejects a write; both mean
    /// the test itself is broken.
    pub async fn seed_catalog(&self, drafts: &[ProductDraft]) -> Vec<ProductId> {
        let admin = ProductAdmin::new(self.store());
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            ids.push(admin.create(draft).await.expect("seed product"));
        }
        ids
    }

    /// Read the current catalog as typed products.
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be read; that means the test is broken.
    pub async fn catalog(&self) -> Vec<Product> {
        let mut live: LiveQuery<Product> = LiveQuery::attach(
            self.store().as_ref(),
            Query::collection(greenbasket_core::paths::PRODUCTS),
        )
        .await
        .expect("attach catalog");
        live.changed().await.expect("catalog snapshot").to_vec()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A product draft fixture.
#[must_use]
pub fn draft(name: &str, price: f64, stock: u32) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price,
        description: format!("{name} from the integration fixtures"),
        category: "grocery".to_string(),
        stock,
        image_url: String::new(),
    }
}
