//! GreenBasket Admin - admin console engine.
//!
//! The write side of the catalog and the user directory. Like the
//! storefront, the admin console is a thin layer over the remote store: its
//! screens mirror collections through live queries and its actions are direct
//! document writes. Destructive actions (delete product, delete user) are
//! confirmed by the calling surface before these operations run.
//!
//! # Components
//!
//! - [`products`] - create, update, and delete catalog products
//! - [`users`] - user directory, admin-flag toggle, user deletion
//! - [`dashboard`] - one-shot aggregate counts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod error;
pub mod products;
pub mod users;

pub use dashboard::{DashboardStats, fetch_stats};
pub use error::{AdminError, Result};
pub use products::ProductAdmin;
pub use users::UserAdmin;
