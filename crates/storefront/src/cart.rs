//! Cart mutations and the cart feed.
//!
//! Cart lines live in a per-user sub-collection and are keyed by product id,
//! so "add to cart" is an upsert: re-adding a product overwrites the line
//! instead of duplicating it. Every operation is a single-document write with
//! no read-before-write, so two devices updating the same line resolve as
//! last-writer-wins, not a merge.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use greenbasket_core::{CartItem, CartItemId, Product, UserId, paths};
use greenbasket_store::{DocumentStore, LiveQuery, Query, server_timestamp};

use crate::error::{Result, StorefrontError};

/// Cart operations for signed-in shoppers.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn DocumentStore>,
}

impl CartService {
    /// Create a cart service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Put `quantity` of `product` in the cart, overwriting any existing
    /// line for the same product.
    ///
    /// The line snapshots the product's current name, price, and image; the
    /// cart does not chase later catalog edits.
    ///
    /// # Errors
    ///
    /// [`StorefrontError::InvalidQuantity`] for a zero quantity; store
    /// failures pass through.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_item(&self, user: &UserId, product: &Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(StorefrontError::InvalidQuantity);
        }

        let line = json!({
            "productId": &product.id,
            "name": &product.name,
            "price": product.price,
            "quantity": quantity,
            "imageUrl": &product.image_url,
            "addedAt": server_timestamp(),
        });

        let path = paths::cart_item(user, &CartItemId::from(&product.id));
        self.store.set(&path, line).await?;
        Ok(())
    }

    /// Set a cart line's quantity.
    ///
    /// A quantity of zero deletes the line; a `quantity: 0` document never
    /// persists. Any other value overwrites only the `quantity` field.
    ///
    /// # Errors
    ///
    /// Store failures pass through (including `NotFound` when updating a
    /// line another device already removed).
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, user: &UserId, item: &CartItemId, quantity: u32) -> Result<()> {
        let path = paths::cart_item(user, item);
        if quantity == 0 {
            self.store.delete(&path).await?;
        } else {
            self.store.update(&path, json!({ "quantity": quantity })).await?;
        }
        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Store failures pass through.
    pub async fn remove_item(&self, user: &UserId, item: &CartItemId) -> Result<()> {
        self.set_quantity(user, item, 0).await
    }

    /// Attach a live feed of the shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns any error raised while establishing the subscription.
    #[instrument(skip(self))]
    pub async fn watch(&self, user: &UserId) -> Result<LiveQuery<CartItem>> {
        let query = Query::collection(paths::cart_items(user));
        Ok(LiveQuery::attach(self.store.as_ref(), query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenbasket_core::ProductId;
    use greenbasket_store::MemoryStore;

    fn service() -> (CartService, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        (CartService::new(Arc::clone(&store)), store)
    }

    fn apple() -> Product {
        Product {
            id: ProductId::new("p-apple"),
            name: "Apple".to_string(),
            price: 2.5,
            description: String::new(),
            category: "fruit".to_string(),
            stock: 10,
            image_url: "https://example.com/apple.png".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_add_item_rejects_zero_quantity() {
        let (cart, _store) = service();
        let err = cart
            .add_item(&UserId::new("u1"), &apple(), 0)
            .await
            .expect_err("zero quantity is a precondition error");
        assert!(matches!(err, StorefrontError::InvalidQuantity));
    }

    #[tokio::test]
    async fn test_repeated_add_upserts_single_line() {
        let (cart, _store) = service();
        let user = UserId::new("u1");

        cart.add_item(&user, &apple(), 1).await.expect("add");
        cart.add_item(&user, &apple(), 3).await.expect("re-add");

        let mut feed = cart.watch(&user).await.expect("watch");
        let items = feed.changed().await.expect("snapshot");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].product_id, ProductId::new("p-apple"));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_deletes_the_line() {
        let (cart, _store) = service();
        let user = UserId::new("u1");
        cart.add_item(&user, &apple(), 2).await.expect("add");

        let item = CartItemId::new("p-apple");
        cart.set_quantity(&user, &item, 0).await.expect("set 0");

        let mut feed = cart.watch(&user).await.expect("watch");
        assert!(feed.changed().await.expect("snapshot").is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_updates_only_quantity() {
        let (cart, _store) = service();
        let user = UserId::new("u1");
        cart.add_item(&user, &apple(), 2).await.expect("add");

        cart.set_quantity(&user, &CartItemId::new("p-apple"), 5)
            .await
            .expect("set 5");

        let mut feed = cart.watch(&user).await.expect("watch");
        let items = feed.changed().await.expect("snapshot");
        assert_eq!(items[0].quantity, 5);
        // Snapshot fields copied at add time survive the quantity update.
        assert_eq!(items[0].name, "Apple");
        assert!((items[0].price - 2.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_remove_item_is_set_quantity_zero() {
        let (cart, _store) = service();
        let user = UserId::new("u1");
        cart.add_item(&user, &apple(), 1).await.expect("add");

        cart.remove_item(&user, &CartItemId::new("p-apple"))
            .await
            .expect("remove");

        let mut feed = cart.watch(&user).await.expect("watch");
        assert!(feed.changed().await.expect("snapshot").is_empty());
    }

    #[tokio::test]
    async fn test_carts_are_scoped_per_user() {
        let (cart, _store) = service();
        cart.add_item(&UserId::new("u1"), &apple(), 1)
            .await
            .expect("add");

        let mut feed = cart.watch(&UserId::new("u2")).await.expect("watch");
        assert!(feed.changed().await.expect("snapshot").is_empty());
    }
}
