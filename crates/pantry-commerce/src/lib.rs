//! Storefront domain types and logic for Pantry.
//!
//! - **Cart**: the cart ledger, its line items, and the pricing aggregator
//! - **Catalog**: product records from the content API, listing queries,
//!   and the product detail flow that seeds the cart
//! - **Checkout**: shipping details capture and the order summary
//!
//! # Example
//!
//! ```rust
//! use pantry_cache::MemoryStore;
//! use pantry_commerce::prelude::*;
//!
//! let mut cart = CartLedger::load(MemoryStore::new());
//! cart.add_or_merge("A", "Sourdough", 10.0, "", 2).unwrap();
//! cart.add_or_merge("B", "Oat milk", 5.0, "", 1).unwrap();
//!
//! let pricing = cart.pricing(&PricingOptions::default());
//! assert_eq!(pricing.subtotal, 25.0);
//! assert_eq!(pricing.total, 21.25);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::format_price;

    // Cart
    pub use crate::cart::{CartLedger, LineItem, PricePolicy, PricingOptions, PricingSnapshot};

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogQuery, JsonCatalog, ProductDetail, ProductRecord, QuantityStepper,
        PAGE_SIZE,
    };

    // Checkout
    pub use crate::checkout::{OrderSummary, ShippingCharge, ShippingDetails, SummaryLine};
}
