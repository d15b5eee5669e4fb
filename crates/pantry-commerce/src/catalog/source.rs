//! Catalog sources.

use std::path::Path;

use async_trait::async_trait;

use crate::catalog::{CatalogQuery, ProductRecord};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Where product records come from.
///
/// The cart never talks to a catalog directly; the listing and detail flows do,
/// and the detail flow hands one record to the cart.
#[async_trait(?Send)]
pub trait Catalog {
    /// Run a listing query, returning at most one page of records.
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<ProductRecord>, CommerceError>;

    /// Look up a single product.
    async fn product(&self, id: &ProductId) -> Result<Option<ProductRecord>, CommerceError>;
}

/// In-process catalog over a fixed list of records.
///
/// Accepts the content API's response shape, either a bare array of records or
/// an envelope `{ "result": [...] }`.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    products: Vec<ProductRecord>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Envelope { result: Vec<ProductRecord> },
    Records(Vec<ProductRecord>),
}

impl JsonCatalog {
    /// Create a catalog from records.
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products = match serde_json::from_str::<CatalogDocument>(json)? {
            CatalogDocument::Envelope { result } => result,
            CatalogDocument::Records(records) => records,
        };
        Ok(Self::new(products))
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::CatalogError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// All records.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in listing order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.products.iter().filter_map(|p| p.category.as_ref()) {
            if !seen.contains(&category.as_str()) {
                seen.push(category.as_str());
            }
        }
        seen
    }

    /// Number of records matching a query across all pages.
    pub fn count(&self, query: &CatalogQuery) -> usize {
        self.products.iter().filter(|p| query.matches(p)).count()
    }
}

#[async_trait(?Send)]
impl Catalog for JsonCatalog {
    async fn search(&self, query: &CatalogQuery) -> Result<Vec<ProductRecord>, CommerceError> {
        Ok(query.apply(&self.products))
    }

    async fn product(&self, id: &ProductId) -> Result<Option<ProductRecord>, CommerceError> {
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }
}
