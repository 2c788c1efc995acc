//! Product management.
//!
//! Drafts are validated before any remote call; a rejected draft never
//! touches the store. Creation stamps a server-assigned `createdAt`; updates
//! replace the editable fields and leave the creation timestamp alone.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use greenbasket_core::{Product, ProductDraft, ProductId, paths};
use greenbasket_store::{DocumentStore, LiveQuery, Query, server_timestamp};

use crate::error::Result;

/// Product write operations for the admin console.
#[derive(Clone)]
pub struct ProductAdmin {
    store: Arc<dyn DocumentStore>,
}

impl ProductAdmin {
    /// Create a product admin over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a product. Returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// Validation failures (blank name, negative price) are returned before
    /// any remote call; store failures pass through.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: &ProductDraft) -> Result<ProductId> {
        draft.validate()?;

        let mut fields = draft_fields(draft);
        fields.insert("createdAt".to_string(), server_timestamp());

        let id = self.store.add(paths::PRODUCTS, Value::Object(fields)).await?;
        Ok(ProductId::new(id))
    }

    /// Replace a product's editable fields.
    ///
    /// # Errors
    ///
    /// Validation failures are returned before any remote call;
    /// `StoreError::NotFound` if the product no longer exists.
    #[instrument(skip(self, draft), fields(product = %id, name = %draft.name))]
    pub async fn update(&self, id: &ProductId, draft: &ProductDraft) -> Result<()> {
        draft.validate()?;

        let fields = draft_fields(draft);
        self.store
            .update(&paths::product(id), Value::Object(fields))
            .await?;
        Ok(())
    }

    /// Delete a product.
    ///
    /// Existing cart lines and order snapshots keep their copied name and
    /// price; deletion only removes the catalog document.
    ///
    /// # Errors
    ///
    /// Store failures pass through.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductId) -> Result<()> {
        self.store.delete(&paths::product(id)).await?;
        Ok(())
    }

    /// Attach a live feed of the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns any error raised while establishing the subscription.
    pub async fn watch(&self) -> Result<LiveQuery<Product>> {
        Ok(LiveQuery::attach(self.store.as_ref(), Query::collection(paths::PRODUCTS)).await?)
    }
}

/// Serialize a draft's editable fields.
fn draft_fields(draft: &ProductDraft) -> serde_json::Map<String, Value> {
    match serde_json::to_value(draft) {
        Ok(Value::Object(map)) => map,
        // A plain struct with string/number fields always serializes to an
        // object; this arm is unreachable in practice.
        _ => serde_json::Map::new(),
    }
}
