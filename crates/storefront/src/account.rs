//! Profile creation at registration.
//!
//! The credential side of registration (password, token issuance) is the
//! identity provider's business. Once it has produced a user id, the
//! storefront writes the profile document every other screen reads. New
//! profiles are never admins.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use greenbasket_core::{UserId, paths};
use greenbasket_store::{DocumentStore, server_timestamp};

use crate::error::Result;

/// Profile fields collected by the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Write the profile document for a freshly registered user.
///
/// # Errors
///
/// Store failures pass through.
#[instrument(skip(store, profile), fields(user = %user))]
pub async fn create_profile(
    store: &Arc<dyn DocumentStore>,
    user: &UserId,
    profile: &NewProfile,
) -> Result<()> {
    let fields = json!({
        "name": &profile.name,
        "email": &profile.email,
        "phone": &profile.phone,
        "isAdmin": false,
        "createdAt": server_timestamp(),
    });
    store.set(&paths::user(user), fields).await?;
    Ok(())
}
