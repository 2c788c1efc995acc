//! GreenBasket Storefront - shopper-facing sync engine.
//!
//! The storefront is a thin reactive layer over the remote document store:
//! every screen-visible collection is a live-query mirror, every user action
//! is a direct store write, and the store reflects writes back through the
//! mirrors. Nothing here owns data; the store is the source of truth.
//!
//! # Components
//!
//! - [`session`] - explicit authenticated identity at the engine edge
//! - [`catalog`] - product mirror and the search derivation
//! - [`cart`] - cart line upserts, quantity updates, removal, cart feed
//! - [`checkout`] - the order-create + cart-clear sequence
//! - [`orders`] - per-shopper order history feed
//! - [`account`] - profile document creation at registration
//! - [`view`] - pure presentation derivations (totals, price formatting)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod orders;
pub mod session;
pub mod view;

pub use cart::CartService;
pub use catalog::CatalogFeed;
pub use checkout::{Checkout, CheckoutReceipt};
pub use error::{Result, StorefrontError};
pub use orders::OrdersFeed;
pub use session::Session;
