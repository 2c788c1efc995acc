//! Product catalog feed and search.
//!
//! The home screen mirrors the whole `products` collection and derives its
//! visible list from a search box. The derivation is pure: it borrows from
//! the mirror and never mutates it.

use std::sync::Arc;

use tracing::instrument;

use greenbasket_core::{Product, paths};
use greenbasket_store::{DocumentStore, LiveQuery, Query};

use crate::error::Result;

/// Live mirror of the product catalog.
#[derive(Debug)]
pub struct CatalogFeed {
    live: LiveQuery<Product>,
}

impl CatalogFeed {
    /// Attach to the catalog.
    ///
    /// # Errors
    ///
    /// Returns any error raised while establishing the subscription.
    #[instrument(skip(store))]
    pub async fn attach(store: &Arc<dyn DocumentStore>) -> Result<Self> {
        let live = LiveQuery::attach(store.as_ref(), Query::collection(paths::PRODUCTS)).await?;
        Ok(Self { live })
    }

    /// Wait for the next catalog snapshot.
    ///
    /// # Errors
    ///
    /// Surfaces in-band subscription errors and decode failures.
    pub async fn changed(&mut self) -> Result<&[Product]> {
        Ok(self.live.changed().await?)
    }

    /// The mirrored products.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        self.live.items()
    }

    /// Stop receiving catalog updates.
    pub fn cancel(&mut self) {
        self.live.cancel();
    }
}

/// Case-insensitive substring search over product names.
///
/// An empty query matches everything, which is what an empty search box
/// shows.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenbasket_core::ProductId;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: 1.0,
            description: String::new(),
            category: String::new(),
            stock: 1,
            image_url: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let products = vec![product("p1", "apple"), product("p2", "Banana")];

        let hits = search(&products, "AP");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "apple");

        let hits = search(&products, "an");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Banana");
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let products = vec![product("p1", "apple"), product("p2", "Banana")];
        assert_eq!(search(&products, "").len(), 2);
    }

    #[test]
    fn test_no_match_is_empty() {
        let products = vec![product("p1", "apple")];
        assert!(search(&products, "zucchini").is_empty());
    }
}
