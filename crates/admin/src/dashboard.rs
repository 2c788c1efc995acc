//! Dashboard aggregate counts.
//!
//! The dashboard does not need live updates, only a point-in-time count of
//! each collection, so it uses one-shot reads instead of subscriptions.

use std::sync::Arc;

use tracing::instrument;

use greenbasket_core::paths;
use greenbasket_store::DocumentStore;

use crate::error::Result;

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_users: usize,
    pub total_orders: usize,
}

/// Read the current collection counts.
///
/// # Errors
///
/// Store failures pass through; the caller shows a failure notice rather
/// than partial numbers.
#[instrument(skip(store))]
pub async fn fetch_stats(store: &Arc<dyn DocumentStore>) -> Result<DashboardStats> {
    let products = store.get(paths::PRODUCTS).await?;
    let users = store.get(paths::USERS).await?;
    let orders = store.get(paths::ORDERS).await?;

    Ok(DashboardStats {
        total_products: products.len(),
        total_users: users.len(),
        total_orders: orders.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_counts_reflect_collections() {
        let store: Arc<dyn DocumentStore> = Arc::new(greenbasket_store::MemoryStore::new());
        store
            .add(paths::PRODUCTS, json!({"name": "Apple", "price": 1.0}))
            .await
            .expect("add product");
        store
            .add(paths::PRODUCTS, json!({"name": "Banana", "price": 0.5}))
            .await
            .expect("add product");
        store
            .set(
                "users/u1",
                json!({"name": "Asha", "email": "asha@example.com"}),
            )
            .await
            .expect("add user");

        let stats = fetch_stats(&store).await.expect("stats");
        assert_eq!(
            stats,
            DashboardStats {
                total_products: 2,
                total_users: 1,
                total_orders: 0,
            }
        );
    }
}
