//! The cart ledger: line items keyed by product, persisted on every change.

use pantry_cache::{Cache, Store, CART_KEY};
use serde::{Deserialize, Serialize};

use crate::cart::{LineItem, PricingOptions, PricingSnapshot};
use crate::catalog::ProductRecord;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Which unit price applies when a product already in the cart is added again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricePolicy {
    /// Keep the unit price from the first add; later prices are ignored.
    #[default]
    FreezeFirst,
    /// Reprice the whole line at the most recently supplied price.
    Overwrite,
}

impl PricePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricePolicy::FreezeFirst => "freeze_first",
            PricePolicy::Overwrite => "overwrite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "freeze_first" | "freeze" => Some(PricePolicy::FreezeFirst),
            "overwrite" => Some(PricePolicy::Overwrite),
            _ => None,
        }
    }
}

/// The shopper's cart.
///
/// Holds an ordered list of [`LineItem`]s with at most one entry per product.
/// The ledger is loaded once from its store, mutated in memory, and the full
/// list is written back after every mutation. Write failures are logged and
/// otherwise ignored: the in-memory ledger stays authoritative for the session.
#[derive(Debug)]
pub struct CartLedger<S: Store> {
    items: Vec<LineItem>,
    cache: Cache<S>,
    key: String,
    policy: PricePolicy,
}

impl<S: Store> CartLedger<S> {
    /// Load the cart from `store` with the default price policy.
    ///
    /// Missing or malformed snapshots yield an empty cart.
    pub fn load(store: S) -> Self {
        Self::load_with_policy(store, PricePolicy::default())
    }

    /// Load the cart from `store` with an explicit price policy.
    pub fn load_with_policy(store: S, policy: PricePolicy) -> Self {
        Self::load_from(store, CART_KEY, policy)
    }

    /// Load the cart stored under a custom key.
    pub fn load_from(store: S, key: impl Into<String>, policy: PricePolicy) -> Self {
        let cache = Cache::new(store);
        let key = key.into();
        let items = read_snapshot(&cache, &key);
        tracing::debug!(key = %key, lines = items.len(), "cart loaded");
        Self {
            items,
            cache,
            key,
            policy,
        }
    }

    /// Re-read the stored snapshot, discarding in-memory state.
    pub fn reload(&mut self) {
        self.items = read_snapshot(&self.cache, &self.key);
    }

    /// Add a product, or merge into its existing line.
    ///
    /// A new product is appended with `quantity` units. An existing product has
    /// its quantity increased and its total recomputed using the unit price
    /// chosen by the ledger's [`PricePolicy`]. Returns the affected line.
    pub fn add_or_merge(
        &mut self,
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: f64,
        image: impl Into<String>,
        quantity: u32,
    ) -> Result<&LineItem, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(CommerceError::InvalidPrice(unit_price));
        }

        let product_id = product_id.into();
        let index = match self.position(&product_id) {
            Some(index) => {
                let existing = &mut self.items[index];
                if existing.add_quantity(quantity).is_none() {
                    return Err(CommerceError::QuantityOverflow(product_id.into_inner()));
                }
                if existing.price != unit_price {
                    match self.policy {
                        PricePolicy::Overwrite => existing.set_unit_price(unit_price),
                        PricePolicy::FreezeFirst => tracing::debug!(
                            product = %product_id,
                            kept = existing.price,
                            ignored = unit_price,
                            "keeping first unit price"
                        ),
                    }
                }
                tracing::debug!(
                    product = %product_id,
                    quantity = existing.quantity,
                    "merged into existing line"
                );
                index
            }
            None => {
                let item = LineItem::new(product_id, name, unit_price, image, quantity);
                tracing::debug!(product = %item.id, quantity, "added new line");
                self.items.push(item);
                self.items.len() - 1
            }
        };

        self.persist();
        Ok(&self.items[index])
    }

    /// Add the product behind a catalog record.
    pub fn add_product(
        &mut self,
        product: &ProductRecord,
        quantity: u32,
    ) -> Result<&LineItem, CommerceError> {
        self.add_or_merge(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.image_url().unwrap_or_default(),
            quantity,
        )
    }

    /// Remove a product's line. Returns whether anything was removed.
    ///
    /// Removing an absent product is a no-op and does not touch the store.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };
        self.items.remove(index);
        tracing::debug!(product = %product_id, "removed line");
        self.persist();
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    /// All lines in insertion order.
    pub fn all(&self) -> &[LineItem] {
        &self.items
    }

    /// Get a line by product.
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of the stored line totals, as shown on the cart page.
    pub fn line_subtotal(&self) -> f64 {
        self.items.iter().map(|i| i.total).sum()
    }

    /// Price the current contents.
    pub fn pricing(&self, options: &PricingOptions) -> PricingSnapshot {
        PricingSnapshot::compute(&self.items, options)
    }

    /// The active price policy.
    pub fn policy(&self) -> PricePolicy {
        self.policy
    }

    /// Change the price policy for subsequent adds.
    pub fn set_policy(&mut self, policy: PricePolicy) {
        self.policy = policy;
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Consume the ledger and return its store.
    pub fn into_store(self) -> S {
        self.cache.into_inner()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == product_id)
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(&self.key, &self.items) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

/// Read and normalize a stored snapshot; anything unreadable becomes empty.
fn read_snapshot<S: Store>(cache: &Cache<S>, key: &str) -> Vec<LineItem> {
    match cache.get::<Vec<LineItem>>(key) {
        Ok(Some(items)) => normalize(items),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable cart snapshot");
            Vec::new()
        }
    }
}

/// Restore ledger invariants on a snapshot that may have been edited by hand.
///
/// Lines with zero quantity or an unusable price are dropped, duplicate ids are
/// merged into the first occurrence, and every total is recomputed.
fn normalize(raw: Vec<LineItem>) -> Vec<LineItem> {
    let mut items: Vec<LineItem> = Vec::with_capacity(raw.len());

    for mut item in raw {
        if item.quantity == 0 || !item.price.is_finite() || item.price < 0.0 {
            tracing::warn!(product = %item.id, "dropping invalid stored line");
            continue;
        }
        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            tracing::warn!(product = %item.id, "merging duplicate stored line");
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            existing.update_total();
            continue;
        }
        if !item.is_consistent() {
            tracing::warn!(product = %item.id, stored = item.total, "repairing stored line total");
            item.update_total();
        }
        items.push(item);
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_cache::MemoryStore;

    fn ledger() -> CartLedger<MemoryStore> {
        CartLedger::load(MemoryStore::new())
    }

    #[test]
    fn test_add_new_product() {
        let mut cart = ledger();
        let item = cart.add_or_merge("A", "Sourdough", 10.0, "a.png", 2).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.total, 20.0);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = ledger();
        cart.add_or_merge("A", "Sourdough", 10.0, "", 2).unwrap();
        cart.add_or_merge("A", "Sourdough", 10.0, "", 3).unwrap();

        assert_eq!(cart.len(), 1);
        let item = cart.get(&ProductId::new("A")).unwrap();
        assert_eq!(item.quantity, 5);
        assert_eq!(item.total, 50.0);
    }

    #[test]
    fn test_freeze_first_price() {
        let mut cart = ledger();
        cart.add_or_merge("A", "Sourdough", 10.0, "", 1).unwrap();
        let item = cart.add_or_merge("A", "Sourdough", 12.0, "", 1).unwrap();
        assert_eq!(item.price, 10.0);
        assert_eq!(item.total, 20.0);
    }

    #[test]
    fn test_overwrite_price() {
        let mut cart = CartLedger::load_with_policy(MemoryStore::new(), PricePolicy::Overwrite);
        cart.add_or_merge("A", "Sourdough", 10.0, "", 1).unwrap();
        let item = cart.add_or_merge("A", "Sourdough", 12.0, "", 1).unwrap();
        assert_eq!(item.price, 12.0);
        assert_eq!(item.total, 24.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = ledger();
        cart.add_or_merge("B", "Oat milk", 5.0, "", 1).unwrap();
        cart.add_or_merge("A", "Sourdough", 10.0, "", 1).unwrap();
        cart.add_or_merge("B", "Oat milk", 5.0, "", 1).unwrap();

        let ids: Vec<&str> = cart.all().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn test_invalid_inputs_leave_cart_untouched() {
        let store = MemoryStore::new();
        let mut cart = CartLedger::load(store.clone());

        assert!(matches!(
            cart.add_or_merge("A", "Sourdough", 10.0, "", 0),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_or_merge("A", "Sourdough", -1.0, "", 1),
            Err(CommerceError::InvalidPrice(_))
        ));
        assert!(cart.add_or_merge("A", "Sourdough", f64::NAN, "", 1).is_err());
        assert!(cart.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_quantity_overflow() {
        let mut cart = ledger();
        cart.add_or_merge("A", "Sourdough", 1.0, "", u32::MAX).unwrap();
        assert!(matches!(
            cart.add_or_merge("A", "Sourdough", 1.0, "", 1),
            Err(CommerceError::QuantityOverflow(_))
        ));
        assert_eq!(cart.get(&ProductId::new("A")).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_remove() {
        let mut cart = ledger();
        cart.add_or_merge("A", "Sourdough", 10.0, "", 1).unwrap();
        cart.add_or_merge("B", "Oat milk", 5.0, "", 1).unwrap();

        assert!(cart.remove(&ProductId::new("A")));
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(&ProductId::new("A")));
    }

    #[test]
    fn test_remove_missing_does_not_write() {
        let store = MemoryStore::new();
        let mut cart = CartLedger::load(store.clone());
        assert!(!cart.remove(&ProductId::new("missing")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let store = MemoryStore::new();
        let mut cart = CartLedger::load(store.clone());
        cart.add_or_merge("A", "Sourdough", 10.0, "", 1).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(store.get(CART_KEY).unwrap().unwrap(), b"[]".to_vec());
    }

    #[test]
    fn test_counts_and_line_subtotal() {
        let mut cart = ledger();
        cart.add_or_merge("A", "Sourdough", 10.0, "", 2).unwrap();
        cart.add_or_merge("B", "Oat milk", 5.0, "", 1).unwrap();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.line_subtotal(), 25.0);
        assert_eq!(
            cart.line_subtotal(),
            cart.pricing(&PricingOptions::default()).subtotal
        );
    }

    #[test]
    fn test_malformed_snapshot_loads_empty() {
        let cart = CartLedger::load(MemoryStore::with_entry(CART_KEY, "not json"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_wrong_shape_snapshot_loads_empty() {
        let cart = CartLedger::load(MemoryStore::with_entry(CART_KEY, r#"{"id":"A"}"#));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_normalize_repairs_snapshot() {
        let raw = r#"[
            {"id":"A","name":"Sourdough","price":10,"quantity":2,"total":5,"image":""},
            {"id":"B","name":"Oat milk","price":5,"quantity":0,"total":0,"image":""},
            {"id":"A","name":"Sourdough","price":10,"quantity":1,"total":10,"image":""}
        ]"#;
        let cart = CartLedger::load(MemoryStore::with_entry(CART_KEY, raw));

        assert_eq!(cart.len(), 1);
        let item = &cart.all()[0];
        assert_eq!(item.quantity, 3);
        assert_eq!(item.total, 30.0);
    }

    #[test]
    fn test_price_policy_parse() {
        assert_eq!(PricePolicy::from_str("overwrite"), Some(PricePolicy::Overwrite));
        assert_eq!(PricePolicy::from_str("freeze-first"), Some(PricePolicy::FreezeFirst));
        assert_eq!(PricePolicy::from_str("latest"), None);
        assert_eq!(PricePolicy::Overwrite.as_str(), "overwrite");
    }
}
