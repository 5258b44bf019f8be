//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Two catalog entries share one id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// The cart has nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Database error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(feature = "storage")]
impl From<tom_db::DbError> for CommerceError {
    fn from(e: tom_db::DbError) -> Self {
        CommerceError::DatabaseError(e.to_string())
    }
}

#[cfg(feature = "storage")]
impl From<tom_cache::CacheError> for CommerceError {
    fn from(e: tom_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
