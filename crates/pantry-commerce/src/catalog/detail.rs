//! Product detail flow: quantity selection and add-to-cart.

use pantry_cache::Store;

use crate::cart::{CartLedger, LineItem};
use crate::catalog::ProductRecord;
use crate::error::CommerceError;

/// Quantity selector bounded below at one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self { value: 1 }
    }
}

impl QuantityStepper {
    /// Start at one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current quantity.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Step up by one.
    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// Step down by one, never below one.
    pub fn decrement(&mut self) -> u32 {
        self.value = self.value.saturating_sub(1).max(1);
        self.value
    }

    /// Set an explicit quantity, clamped to at least one.
    pub fn set(&mut self, value: u32) -> u32 {
        self.value = value.max(1);
        self.value
    }
}

/// State of the product detail page.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProductDetail {
    /// Lookup in flight.
    #[default]
    Loading,
    /// Lookup failed or the product does not exist.
    Unavailable,
    /// Product loaded; the shopper is choosing a quantity.
    Ready {
        product: ProductRecord,
        stepper: QuantityStepper,
    },
}

impl ProductDetail {
    /// Build the page state from a catalog lookup.
    ///
    /// Fetch errors and missing products both render as unavailable.
    pub fn from_lookup(lookup: Result<Option<ProductRecord>, CommerceError>) -> Self {
        match lookup {
            Ok(Some(product)) => ProductDetail::Ready {
                product,
                stepper: QuantityStepper::new(),
            },
            Ok(None) => ProductDetail::Unavailable,
            Err(e) => {
                tracing::warn!(error = %e, "product lookup failed");
                ProductDetail::Unavailable
            }
        }
    }

    /// The loaded product, if any.
    pub fn product(&self) -> Option<&ProductRecord> {
        match self {
            ProductDetail::Ready { product, .. } => Some(product),
            _ => None,
        }
    }

    /// The quantity selector, if a product is loaded.
    pub fn stepper_mut(&mut self) -> Option<&mut QuantityStepper> {
        match self {
            ProductDetail::Ready { stepper, .. } => Some(stepper),
            _ => None,
        }
    }

    /// Selected quantity, if a product is loaded.
    pub fn quantity(&self) -> Option<u32> {
        match self {
            ProductDetail::Ready { stepper, .. } => Some(stepper.value()),
            _ => None,
        }
    }

    /// Add the selected quantity of the loaded product to the cart.
    ///
    /// Does nothing to the cart unless a product is loaded.
    pub fn add_to_cart<'c, S: Store>(
        &self,
        cart: &'c mut CartLedger<S>,
    ) -> Result<&'c LineItem, CommerceError> {
        match self {
            ProductDetail::Ready { product, stepper } => cart.add_product(product, stepper.value()),
            ProductDetail::Loading => Err(CommerceError::ProductUnavailable("loading".into())),
            ProductDetail::Unavailable => {
                Err(CommerceError::ProductUnavailable("not found".into()))
            }
        }
    }
}
