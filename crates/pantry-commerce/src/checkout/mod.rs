//! Checkout module.
//!
//! Contains the shipping details form and the order summary.

mod shipping;
mod summary;

pub use shipping::ShippingDetails;
pub use summary::{OrderSummary, ShippingCharge, SummaryLine};
