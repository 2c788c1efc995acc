//! GreenBasket Core - Shared types library.
//!
//! This crate provides common types used across all GreenBasket components:
//! - `store` - Remote document-store boundary and in-memory backend
//! - `storefront` - Shopper-facing sync engine (catalog, cart, checkout, orders)
//! - `admin` - Admin console engine (products, users, dashboard)
//! - `cli` - Command-line tools for seed data and demos
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no store
//! access, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, timestamps, money, and statuses
//! - [`documents`] - Document models mirroring the remote collections
//! - [`paths`] - Collection and document path builders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod documents;
pub mod paths;
pub mod types;

pub use documents::*;
pub use types::*;
