//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// One distinct product held in the cart.
///
/// The serialized field names are the persisted snapshot format:
/// `{id, name, price, quantity, total, image}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier, unique within a ledger.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, at least one.
    pub quantity: u32,
    /// Line total, always `price * quantity`.
    pub total: f64,
    /// Image reference; opaque to the cart.
    #[serde(default)]
    pub image: String,
}

impl LineItem {
    /// Create a new line item with its total computed.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            total: price * f64::from(quantity),
            image: image.into(),
        }
    }

    /// The total this line should carry for its price and quantity.
    pub fn expected_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Check the line-total invariant.
    pub fn is_consistent(&self) -> bool {
        self.total == self.expected_total()
    }

    /// Increase quantity and recompute the total.
    ///
    /// Returns `None` (leaving the item untouched) on overflow.
    pub fn add_quantity(&mut self, quantity: u32) -> Option<u32> {
        let new_quantity = self.quantity.checked_add(quantity)?;
        self.quantity = new_quantity;
        self.update_total();
        Some(new_quantity)
    }

    /// Replace the unit price and recompute the total.
    pub fn set_unit_price(&mut self, price: f64) {
        self.price = price;
        self.update_total();
    }

    pub(crate) fn update_total(&mut self) {
        self.total = self.expected_total();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_total() {
        let item = LineItem::new("A", "Sourdough", 10.0, "img.png", 2);
        assert_eq!(item.total, 20.0);
        assert!(item.is_consistent());
    }

    #[test]
    fn test_add_quantity_recomputes_total() {
        let mut item = LineItem::new("A", "Sourdough", 2.5, "", 1);
        assert_eq!(item.add_quantity(3), Some(4));
        assert_eq!(item.total, 10.0);
    }

    #[test]
    fn test_add_quantity_overflow() {
        let mut item = LineItem::new("A", "Sourdough", 1.0, "", u32::MAX);
        assert_eq!(item.add_quantity(1), None);
        assert_eq!(item.quantity, u32::MAX);
    }

    #[test]
    fn test_persisted_field_names() {
        let item = LineItem::new("A", "Sourdough", 10.0, "img.png", 2);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "A",
                "name": "Sourdough",
                "price": 10.0,
                "quantity": 2,
                "total": 20.0,
                "image": "img.png"
            })
        );
    }

    #[test]
    fn test_image_defaults_when_missing() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":"A","name":"Sourdough","price":1.5,"quantity":2,"total":3.0}"#,
        )
        .unwrap();
        assert_eq!(item.image, "");
    }
}
