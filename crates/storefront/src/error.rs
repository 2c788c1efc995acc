//! Unified error handling for the storefront engine.
//!
//! Precondition failures are raised before any remote call is attempted;
//! remote failures are converted at the call boundary and surfaced to the
//! caller as a single dismissible notice - no automatic retry, no backoff.

use thiserror::Error;

use greenbasket_store::StoreError;

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Operation requires an authenticated user and none is present.
    #[error("not signed in")]
    NotSignedIn,

    /// Add-to-cart was called with a zero quantity.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Remote store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(StorefrontError::NotSignedIn.to_string(), "not signed in");
        assert_eq!(StorefrontError::EmptyCart.to_string(), "cart is empty");

        let err = StorefrontError::from(StoreError::Backend("offline".to_string()));
        assert_eq!(err.to_string(), "store error: backend error: offline");
    }
}
