//! Unified error handling for the admin engine.

use thiserror::Error;

use greenbasket_core::ProductDraftError;
use greenbasket_store::StoreError;

/// Admin-level error type.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A product draft failed validation; no remote call was made.
    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ProductDraftError),

    /// Remote store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
