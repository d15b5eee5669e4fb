//! Product records from the content API.

use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ProductId};

/// A product as returned by the content API.
///
/// Field names follow the API's JSON: the document id arrives as `_id` and
/// optional fields are camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category the product is listed under.
    #[serde(default)]
    pub category: Option<CategoryId>,
    /// Current price.
    pub price: f64,
    /// Price before markdown, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Free-form tags (e.g., "Best Seller").
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the product is currently offered.
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: bool,
    /// Product image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ProductImage>,
}

/// Image reference in the content API's `{ asset: { url } }` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub asset: Option<ImageAsset>,
}

/// Resolved image asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAsset {
    pub url: String,
}

impl ProductRecord {
    /// Create a minimal available record.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            price,
            original_price: None,
            tags: Vec::new(),
            description: None,
            available: true,
            image: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image = Some(ProductImage {
            asset: Some(ImageAsset { url: url.into() }),
        });
        self
    }

    /// Resolved image URL, if the record carries one.
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|img| img.asset.as_ref())
            .map(|asset| asset.url.as_str())
    }

    /// Check if the product is marked down from its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }

    /// Check for a tag, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Category name, or an empty string.
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.as_str()).unwrap_or("")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "_id": "food-1",
            "name": "Chicken Burger",
            "category": "Burger",
            "price": 21,
            "originalPrice": 45,
            "tags": ["Best Seller"],
            "description": "Grilled",
            "available": true,
            "image": { "asset": { "url": "https://cdn.example/burger.png" } }
        }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "food-1");
        assert_eq!(record.category_name(), "Burger");
        assert_eq!(record.image_url(), Some("https://cdn.example/burger.png"));
        assert!(record.is_on_sale());
        assert!(record.has_tag("best seller"));
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{"_id":"food-2","name":"Water","price":1.5,"tags":null,"available":null,"image":null}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();

        assert!(record.tags.is_empty());
        assert!(!record.available);
        assert_eq!(record.image_url(), None);
        assert!(!record.is_on_sale());
    }

    #[test]
    fn test_image_without_asset() {
        let json = r#"{"_id":"food-3","name":"Tea","price":2,"image":{"asset":null}}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.image_url(), None);
    }

    #[test]
    fn test_builder_helpers() {
        let record = ProductRecord::new("food-4", "Fries", 4.0)
            .with_category("Sides")
            .with_image_url("fries.png");
        assert_eq!(record.category_name(), "Sides");
        assert_eq!(record.image_url(), Some("fries.png"));
        assert!(record.available);
    }
}
