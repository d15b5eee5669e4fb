//! Cart pricing calculations.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::error::CommerceError;

/// Discount applied at checkout when none is configured.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.25;

/// Tax applied at checkout when none is configured.
pub const DEFAULT_TAX_RATE: f64 = 0.10;

/// Rates used by the pricing aggregator, as fractions of the subtotal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricingOptions {
    /// Fraction of the subtotal taken off, in `[0, 1]`.
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    /// Fraction of the subtotal added as tax, `>= 0`.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_discount_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl PricingOptions {
    /// Create validated options.
    pub fn new(discount_rate: f64, tax_rate: f64) -> Result<Self, CommerceError> {
        let options = Self {
            discount_rate,
            tax_rate,
        };
        options.validate()?;
        Ok(options)
    }

    /// Check that both rates are in range.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !(0.0..=1.0).contains(&self.discount_rate) {
            return Err(CommerceError::InvalidRate {
                name: "discount",
                value: self.discount_rate,
            });
        }
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(CommerceError::InvalidRate {
                name: "tax",
                value: self.tax_rate,
            });
        }
        Ok(())
    }
}

/// Derived totals for a cart snapshot. Never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PricingSnapshot {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: f64,
    /// `subtotal * discount_rate`.
    pub discount: f64,
    /// `subtotal * tax_rate`.
    pub tax: f64,
    /// `subtotal - discount + tax`.
    pub total: f64,
}

impl PricingSnapshot {
    /// Compute totals for a sequence of line items.
    ///
    /// The subtotal is recomputed from unit price and quantity rather than
    /// read from the stored line totals.
    pub fn compute<'a, I>(items: I, options: &PricingOptions) -> Self
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let subtotal: f64 = items
            .into_iter()
            .map(|item| item.price * f64::from(item.quantity))
            .sum();
        let discount = subtotal * options.discount_rate;
        let tax = subtotal * options.tax_rate;
        let total = subtotal - discount + tax;

        Self {
            subtotal,
            discount,
            tax,
            total,
        }
    }

    /// Check if there is nothing to pay for.
    pub fn is_empty(&self) -> bool {
        self.subtotal == 0.0
    }
}
