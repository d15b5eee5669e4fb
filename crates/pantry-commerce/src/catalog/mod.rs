//! Catalog module.
//!
//! Product records as served by the content API, listing queries with
//! search / category / price filters, and the product detail flow.

mod detail;
mod product;
mod query;
mod source;

pub use detail::{ProductDetail, QuantityStepper};
pub use product::{ImageAsset, ProductImage, ProductRecord};
pub use query::{CatalogQuery, DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN, DOCUMENT_TYPE, PAGE_SIZE};
pub use source::{Catalog, JsonCatalog};
