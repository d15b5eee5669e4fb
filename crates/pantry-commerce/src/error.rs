//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity to add must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Unit price must be finite and non-negative.
    #[error("Invalid unit price: {0}")]
    InvalidPrice(f64),

    /// Discount or tax rate out of range.
    #[error("Invalid {name} rate: {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// Adding would overflow the line quantity.
    #[error("Quantity overflow for {0}")]
    QuantityOverflow(String),

    /// Product record is missing or could not be fetched.
    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),

    /// Catalog source failed.
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<pantry_cache::CacheError> for CommerceError {
    fn from(e: pantry_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
