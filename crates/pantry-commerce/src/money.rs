//! Price display helpers.
//!
//! Prices are plain `f64` values in a single, implicit currency. Arithmetic
//! stays exact-as-computed; rounding to two places happens only here, at
//! display time.

/// Symbol shown in front of every displayed price.
pub const CURRENCY_SYMBOL: &str = "\u{20b9}";

/// Decimal places used for display.
pub const DISPLAY_PLACES: usize = 2;

/// Format a price with the currency symbol (e.g., "₹21.25").
pub fn format_price(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_amount(amount))
}

/// Format a price without the symbol (e.g., "21.25").
pub fn format_amount(amount: f64) -> String {
    // Avoid rendering "-0.00" for tiny negative float noise.
    let amount = if amount.abs() < 0.005 { 0.0 } else { amount };
    format!("{:.places$}", amount, places = DISPLAY_PLACES)
}

/// Format a deduction (e.g., "- ₹6.25").
pub fn format_deduction(amount: f64) -> String {
    format!("- {}", format_price(amount))
}
