//! Order summary shown beside the checkout form.

use pantry_cache::Store;
use serde::{Deserialize, Serialize};

use crate::cart::{CartLedger, LineItem, PricingOptions, PricingSnapshot};
use crate::checkout::ShippingDetails;
use crate::money::{format_deduction, format_price};

/// Shipping charge. The shop currently ships everything for free.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum ShippingCharge {
    #[default]
    Free,
    Flat(f64),
}

impl ShippingCharge {
    /// Display text for the summary row.
    pub fn display(&self) -> String {
        match self {
            ShippingCharge::Free => "Free".to_string(),
            ShippingCharge::Flat(amount) => format_price(*amount),
        }
    }
}

/// One row of the summary: "2 x ₹10".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl SummaryLine {
    /// Quantity and unit price as displayed.
    pub fn display(&self) -> String {
        format!("{} x {}", self.quantity, format_price(self.unit_price))
    }
}

impl From<&LineItem> for SummaryLine {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.price,
        }
    }
}

/// Everything the checkout page shows about the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub pricing: PricingSnapshot,
    pub shipping: ShippingCharge,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_to: Option<ShippingDetails>,
}

impl OrderSummary {
    /// Summarize a list of line items.
    pub fn from_items(items: &[LineItem], options: &PricingOptions) -> Self {
        Self {
            lines: items.iter().map(SummaryLine::from).collect(),
            pricing: PricingSnapshot::compute(items, options),
            shipping: ShippingCharge::Free,
            ship_to: None,
        }
    }

    /// Summarize the current cart.
    pub fn from_cart<S: Store>(cart: &CartLedger<S>, options: &PricingOptions) -> Self {
        Self::from_items(cart.all(), options)
    }

    /// Attach the shipping details.
    pub fn with_shipping_details(mut self, details: ShippingDetails) -> Self {
        self.ship_to = Some(details);
        self
    }

    /// Check if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Label and display value for each totals row, in page order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Sub-total", format_price(self.pricing.subtotal)),
            ("Shipping", self.shipping.display()),
            ("Discount", format_deduction(self.pricing.discount)),
            ("Tax", format_price(self.pricing.tax)),
            ("Total", format_price(self.pricing.total)),
        ]
    }
}
