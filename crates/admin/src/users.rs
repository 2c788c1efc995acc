//! User directory management.
//!
//! The admin toggle flips `isAdmin` from the *mirrored* document's value - a
//! single-field write with no read-before-write, so two admins toggling the
//! same user concurrently resolve last-writer-wins. Toggling twice from the
//! same mirror state restores the original value.
//!
//! There is intentionally no guard against an admin demoting themselves or
//! the last remaining admin; a reliable guard would need an authoritative
//! read-modify-write the store boundary does not offer.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use greenbasket_core::{User, UserId, paths};
use greenbasket_store::{DocumentStore, LiveQuery, Query};

use crate::error::Result;

/// User write operations for the admin console.
#[derive(Clone)]
pub struct UserAdmin {
    store: Arc<dyn DocumentStore>,
}

impl UserAdmin {
    /// Create a user admin over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Flip a user's admin flag, based on the mirrored `user` document.
    /// Returns the flag value that was written.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the user document no longer exists; other
    /// store failures pass through.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn toggle_admin(&self, user: &User) -> Result<bool> {
        let promoted = !user.is_admin;
        self.store
            .update(&paths::user(&user.id), json!({ "isAdmin": promoted }))
            .await?;
        Ok(promoted)
    }

    /// Delete a user's profile document.
    ///
    /// The cart sub-collection and placed orders are left behind; orders are
    /// never deleted by client code.
    ///
    /// # Errors
    ///
    /// Store failures pass through.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &UserId) -> Result<()> {
        self.store.delete(&paths::user(id)).await?;
        Ok(())
    }

    /// Attach a live feed of the user directory.
    ///
    /// # Errors
    ///
    /// Returns any error raised while establishing the subscription.
    pub async fn watch(&self) -> Result<LiveQuery<User>> {
        Ok(LiveQuery::attach(self.store.as_ref(), Query::collection(paths::USERS)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> (UserAdmin, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(greenbasket_store::MemoryStore::new());
        (UserAdmin::new(Arc::clone(&store)), store)
    }

    async fn seed_user(store: &Arc<dyn DocumentStore>, id: &str, is_admin: bool) {
        store
            .set(
                &paths::user(&UserId::new(id)),
                json!({"name": id, "email": format!("{id}@example.com"), "isAdmin": is_admin}),
            )
            .await
            .expect("seed user");
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_original_value() {
        let (users, store) = admin();
        seed_user(&store, "u1", false).await;

        let mut feed = users.watch().await.expect("watch");
        let mirrored = feed.changed().await.expect("initial")[0].clone();
        assert!(!mirrored.is_admin);

        assert!(users.toggle_admin(&mirrored).await.expect("promote"));
        let mirrored = feed.changed().await.expect("after promote")[0].clone();
        assert!(mirrored.is_admin);

        assert!(!users.toggle_admin(&mirrored).await.expect("demote"));
        let mirrored = feed.changed().await.expect("after demote")[0].clone();
        assert!(!mirrored.is_admin);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_are_last_writer_wins() {
        let (users, store) = admin();
        seed_user(&store, "u1", false).await;

        let mut feed = users.watch().await.expect("watch");
        let stale = feed.changed().await.expect("initial")[0].clone();

        // Two consoles toggle from the same mirrored state: both write the
        // same value, so the second write changes nothing.
        users.toggle_admin(&stale).await.expect("first toggle");
        users.toggle_admin(&stale).await.expect("second toggle");

        feed.changed().await.expect("first snapshot");
        let current = &feed.changed().await.expect("second snapshot")[0];
        assert!(current.is_admin, "both writers set isAdmin = true");
    }

    #[tokio::test]
    async fn test_delete_removes_profile() {
        let (users, store) = admin();
        seed_user(&store, "u1", false).await;

        users.delete(&UserId::new("u1")).await.expect("delete");

        let snapshot = store.get(paths::USERS).await.expect("get");
        assert!(snapshot.is_empty());
    }
}
