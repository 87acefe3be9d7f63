//! Commerce error types.

use krstore_cache::CacheError;
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Adding one more unit would exceed the stock captured at add-time.
    #[error("Cannot add more than stock for {name}: limit is {limit}")]
    StockExceeded {
        product_id: String,
        name: String,
        limit: u32,
    },

    /// A catalog record failed boundary validation.
    #[error("Invalid product record: {0}")]
    InvalidProduct(String),

    /// The catalog document is not a list of products.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Rating outside 1-5.
    #[error("Invalid rating {0}: must be between 1 and 5")]
    InvalidRating(i64),

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The payment collaborator could not create a payment.
    #[error("Payment creation failed: {0}")]
    PaymentFailed(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Writing persisted state failed.
    #[error("Failed to persist {key}: {reason}")]
    PersistenceWrite { key: String, reason: String },

    /// Persisted state exists but could not be decoded.
    #[error("Corrupt persisted {key}: {reason}")]
    PersistenceReadCorrupt { key: String, reason: String },

    /// Underlying store error.
    #[error("Store error: {0}")]
    Store(#[from] CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl CommerceError {
    /// Whether this is the recoverable stock-limit rejection.
    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, CommerceError::StockExceeded { .. })
    }
}
