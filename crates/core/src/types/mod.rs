//! Core types for GreenBasket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;
pub mod timestamp;

pub use id::*;
pub use status::{OrderStatus, StatusColor};
pub use timestamp::Timestamp;
