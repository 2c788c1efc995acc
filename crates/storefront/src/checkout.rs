//! Checkout: turn the mirrored cart into an order, then clear the cart.
//!
//! The sequence is two independent remote operations:
//!
//! 1. create exactly one order document (`status: pending`, server-assigned
//!    timestamp) snapshotting the mirrored cart lines as-is;
//! 2. delete every cart line in a single atomic batch.
//!
//! There is deliberately no compensation between the steps. If order creation
//! fails, checkout aborts and the cart is untouched. If the cart clear fails
//! after the order committed, the order stands: the call still returns a
//! receipt, with `cart_cleared: false` and a WARN log, and the stale lines
//! remain until the shopper clears them. No rollback, no retry, and no
//! atomicity across the two steps is assumed or implied.
//!
//! The order takes the cart's cached names and prices as ground truth; stock
//! and price are not re-read from the live catalog, so a concurrent admin
//! edit can land in the order at the stale value.

use std::sync::Arc;

use serde_json::json;
use tracing::{instrument, warn};

use greenbasket_core::{CartItem, OrderId, OrderLine, OrderStatus, UserId, paths};
use greenbasket_store::{DocumentStore, server_timestamp};

use crate::error::{Result, StorefrontError};
use crate::view::cart_total;

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The created order.
    pub order_id: OrderId,
    /// Total charged, as written into the order.
    pub total: f64,
    /// Whether the cart clear succeeded. `false` means the order exists but
    /// stale cart lines remain.
    pub cart_cleared: bool,
}

/// The checkout sequencer.
#[derive(Clone)]
pub struct Checkout {
    store: Arc<dyn DocumentStore>,
}

impl Checkout {
    /// Create a checkout sequencer over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Place an order for the given cart mirror.
    ///
    /// # Errors
    ///
    /// [`StorefrontError::EmptyCart`] before any remote call when `cart` has
    /// no lines; store errors from the order write abort the checkout with
    /// the cart untouched. A cart-clear failure after the order committed is
    /// NOT an error - see the module docs.
    #[instrument(skip(self, cart), fields(user = %user, lines = cart.len()))]
    pub async fn place_order(&self, user: &UserId, cart: &[CartItem]) -> Result<CheckoutReceipt> {
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let items: Vec<OrderLine> = cart
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect();
        let total = cart_total(cart);

        let order = json!({
            "userId": user,
            "items": items,
            "total": total,
            "status": OrderStatus::Pending,
            "createdAt": server_timestamp(),
        });

        let order_id = OrderId::new(self.store.add(paths::ORDERS, order).await?);

        let line_paths: Vec<String> = cart
            .iter()
            .map(|line| paths::cart_item(user, &line.id))
            .collect();

        let cart_cleared = match self.store.batch_delete(&line_paths).await {
            Ok(()) => true,
            Err(err) => {
                warn!(order_id = %order_id, error = %err, "order created but cart clear failed");
                false
            }
        };

        Ok(CheckoutReceipt {
            order_id,
            total,
            cart_cleared,
        })
    }
}
