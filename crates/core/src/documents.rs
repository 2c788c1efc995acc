//! Document models for the remote collections.
//!
//! These are the read models a live query decodes snapshots into. Each struct
//! carries the document id injected by the mirror layer alongside the stored
//! fields; write paths use separate draft types (or field maps) that never
//! include the id, since the id is the document's address, not part of its
//! data.
//!
//! Wire field names are camelCase. Optional fields default rather than
//! failing the snapshot, since older documents may predate a field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::id::{CartItemId, OrderId, ProductId, UserId};
use crate::types::status::OrderStatus;
use crate::types::timestamp::Timestamp;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document id (store-assigned).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Product category.
    #[serde(default)]
    pub category: String,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Image URL.
    #[serde(default)]
    pub image_url: String,
    /// Creation timestamp (server-assigned).
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Validation failures for a [`ProductDraft`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductDraftError {
    /// Product name is missing or blank.
    #[error("product name is required")]
    EmptyName,

    /// Price is negative or not a finite number.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
}

/// Fields for creating or replacing a product.
///
/// The admin console builds one of these from form input; `stock` defaults to
/// zero when left blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: String,
}

impl ProductDraft {
    /// Check the draft's invariants: non-blank name, finite non-negative
    /// price. Stock is unsigned, so `stock >= 0` holds by construction.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductDraftError> {
        if self.name.trim().is_empty() {
            return Err(ProductDraftError::EmptyName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ProductDraftError::InvalidPrice(self.price));
        }
        Ok(())
    }
}

/// A registered user's profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document id == the authenticated user id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, if provided at registration.
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether this user can access the admin console.
    #[serde(default)]
    pub is_admin: bool,
    /// Registration timestamp (server-assigned).
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A line in a shopper's cart.
///
/// The document id equals the product id, which is what gives "add to cart"
/// its upsert semantics: re-adding a product overwrites the existing line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Document id (== `product_id`).
    pub id: CartItemId,
    /// The product this line refers to.
    pub product_id: ProductId,
    /// Product name, copied at add time.
    pub name: String,
    /// Unit price, copied at add time.
    pub price: f64,
    /// Quantity; a stored line always has `quantity >= 1`.
    pub quantity: u32,
    /// Image URL, copied at add time.
    #[serde(default)]
    pub image_url: String,
    /// When the line was first added (server-assigned).
    #[serde(default)]
    pub added_at: Option<Timestamp>,
}

impl CartItem {
    /// Price for this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// One line of an order's immutable item snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderLine {
    /// Price for this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A placed order.
///
/// An order is a snapshot of the cart at purchase time: names and prices are
/// copied, never re-derived from the live catalog. Orders are created once at
/// checkout and never deleted by client code; `status` advances externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Document id (store-assigned).
    pub id: OrderId,
    /// The shopper who placed the order.
    pub user_id: UserId,
    /// Item snapshot.
    pub items: Vec<OrderLine>,
    /// Order total at purchase time.
    pub total: f64,
    /// Fulfillment status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Placement timestamp (server-assigned).
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Order {
    /// Short display reference: `#` followed by the last eight characters of
    /// the document id.
    #[must_use]
    pub fn short_ref(&self) -> String {
        let id = self.id.as_str();
        let tail = &id[id.len().saturating_sub(8)..];
        format!("#{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_decodes_with_missing_optional_fields() {
        let product: Product = serde_json::from_value(json!({
            "id": "p1",
            "name": "Apple",
            "price": 2.5,
        }))
        .expect("decode");

        assert_eq!(product.stock, 0);
        assert_eq!(product.description, "");
        assert_eq!(product.created_at, None);
    }

    #[test]
    fn test_product_wire_names_are_camel_case() {
        let product: Product = serde_json::from_value(json!({
            "id": "p1",
            "name": "Apple",
            "price": 2.5,
            "imageUrl": "https://example.com/apple.png",
            "createdAt": 1_000,
        }))
        .expect("decode");

        assert_eq!(product.image_url, "https://example.com/apple.png");
        assert_eq!(product.created_at, Some(Timestamp::from_millis(1_000)));
    }

    #[test]
    fn test_product_draft_validation() {
        let draft = ProductDraft {
            name: "Apple".into(),
            price: 2.5,
            description: String::new(),
            category: String::new(),
            stock: 10,
            image_url: String::new(),
        };
        assert!(draft.validate().is_ok());

        let blank = ProductDraft {
            name: "   ".into(),
            ..draft.clone()
        };
        assert_eq!(blank.validate(), Err(ProductDraftError::EmptyName));

        let negative = ProductDraft {
            price: -1.0,
            ..draft.clone()
        };
        assert_eq!(
            negative.validate(),
            Err(ProductDraftError::InvalidPrice(-1.0))
        );

        let non_finite = ProductDraft {
            price: f64::NAN,
            ..draft
        };
        assert!(non_finite.validate().is_err());
    }

    #[test]
    fn test_cart_item_line_total() {
        let item: CartItem = serde_json::from_value(json!({
            "id": "p1",
            "productId": "p1",
            "name": "Apple",
            "price": 2.5,
            "quantity": 4,
        }))
        .expect("decode");

        assert!((item.line_total() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_user_is_admin_wire_name() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "name": "Asha",
            "email": "asha@example.com",
            "isAdmin": true,
        }))
        .expect("decode");

        assert!(user.is_admin);
        assert_eq!(user.phone, None);
    }

    #[test]
    fn test_order_short_ref() {
        let order = Order {
            id: OrderId::new("abcdef1234567890"),
            user_id: UserId::new("u1"),
            items: vec![],
            total: 0.0,
            status: OrderStatus::Pending,
            created_at: None,
        };
        assert_eq!(order.short_ref(), "#34567890");

        let short = Order {
            id: OrderId::new("ab"),
            ..order
        };
        assert_eq!(short.short_ref(), "#ab");
    }
}
