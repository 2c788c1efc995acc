//! Per-shopper order history feed.
//!
//! Orders are filtered to the owning shopper and sorted by creation time,
//! newest first. The store guarantees that ordering; the feed must not
//! re-sort. Display concerns (status color, order date, short reference) are
//! pure helpers on the core types.

use std::sync::Arc;

use tracing::instrument;

use greenbasket_core::{Order, UserId, paths};
use greenbasket_store::{DocumentStore, LiveQuery, Query, SortDirection};

use crate::error::Result;

/// Live mirror of a shopper's order history.
#[derive(Debug)]
pub struct OrdersFeed {
    live: LiveQuery<Order>,
}

impl OrdersFeed {
    /// Attach to the shopper's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns any error raised while establishing the subscription.
    #[instrument(skip(store))]
    pub async fn attach(store: &Arc<dyn DocumentStore>, user: &UserId) -> Result<Self> {
        let query = Query::collection(paths::ORDERS)
            .where_eq(paths::fields::USER_ID, user.as_str())
            .order_by(paths::fields::CREATED_AT, SortDirection::Descending);
        let live = LiveQuery::attach(store.as_ref(), query).await?;
        Ok(Self { live })
    }

    /// Wait for the next order-history snapshot.
    ///
    /// # Errors
    ///
    /// Surfaces in-band subscription errors and decode failures.
    pub async fn changed(&mut self) -> Result<&[Order]> {
        Ok(self.live.changed().await?)
    }

    /// The mirrored orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.live.items()
    }

    /// Stop receiving order updates.
    pub fn cancel(&mut self) {
        self.live.cancel();
    }
}
