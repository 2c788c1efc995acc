//! Collection and document path builders.
//!
//! Paths are slash-separated: a collection path has an odd number of
//! segments, a document path appends the document id. The cart is a per-user
//! sub-collection under `carts/{userId}/items`.

use crate::types::id::{CartItemId, OrderId, ProductId, UserId};

/// The product catalog collection.
pub const PRODUCTS: &str = "products";

/// The user profiles collection.
pub const USERS: &str = "users";

/// The orders collection.
pub const ORDERS: &str = "orders";

/// Path to a single product document.
#[must_use]
pub fn product(id: &ProductId) -> String {
    format!("{PRODUCTS}/{id}")
}

/// Path to a single user document.
#[must_use]
pub fn user(id: &UserId) -> String {
    format!("{USERS}/{id}")
}

/// Path to a single order document.
#[must_use]
pub fn order(id: &OrderId) -> String {
    format!("{ORDERS}/{id}")
}

/// Path to a shopper's cart items collection.
#[must_use]
pub fn cart_items(user: &UserId) -> String {
    format!("carts/{user}/items")
}

/// Path to a single cart line document.
#[must_use]
pub fn cart_item(user: &UserId, item: &CartItemId) -> String {
    format!("carts/{user}/items/{item}")
}

/// Wire field names used in query predicates.
pub mod fields {
    /// `Order.userId`
    pub const USER_ID: &str = "userId";
    /// Server-assigned creation timestamp.
    pub const CREATED_AT: &str = "createdAt";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_paths_scope_by_user() {
        let user = UserId::new("u1");
        assert_eq!(cart_items(&user), "carts/u1/items");
        assert_eq!(
            cart_item(&user, &CartItemId::new("p9")),
            "carts/u1/items/p9"
        );
    }

    #[test]
    fn test_document_paths() {
        assert_eq!(product(&ProductId::new("p1")), "products/p1");
        assert_eq!(user(&UserId::new("u1")), "users/u1");
        assert_eq!(order(&OrderId::new("o1")), "orders/o1");
    }
}
