//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Cart commands themselves are total; these surface from input
/// validation, checkout and storage.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Checkout attempted with nothing to buy.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// A payment is already being processed for this checkout.
    #[error("Checkout already in progress")]
    CheckoutInProgress,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Payment was declined by the gateway.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// Invalid catalog data.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("{0}")]
    ValidationError(String),
}

impl From<superbike_cache::CacheError> for CommerceError {
    fn from(e: superbike_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
