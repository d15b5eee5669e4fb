//! Shopping cart module.
//!
//! Contains the cart ledger, its line items, and the pricing aggregator.

mod ledger;
mod line_item;
mod pricing;

pub use ledger::{CartLedger, PricePolicy};
pub use line_item::LineItem;
pub use pricing::{PricingOptions, PricingSnapshot, DEFAULT_DISCOUNT_RATE, DEFAULT_TAX_RATE};
