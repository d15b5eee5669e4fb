//! Listing queries: free-text search, categories, price range, pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductRecord;
use crate::ids::{CategoryId, ProductId};

/// Products shown per listing page.
pub const PAGE_SIZE: usize = 9;

/// Lower price bound when none is set.
pub const DEFAULT_PRICE_MIN: f64 = 0.0;

/// Upper price bound when none is set.
pub const DEFAULT_PRICE_MAX: f64 = 100.0;

/// Content API document type for products.
pub const DOCUMENT_TYPE: &str = "food";

/// Fields requested for every product.
const PROJECTION: &str =
    "{ _id, name, category, price, originalPrice, tags, description, available, image { asset -> { url } } }";

/// A product listing query.
///
/// The search term, category set and price range combine conjunctively: a
/// product is listed when its name matches the search (if any), its category
/// is selected (if any are), and its price is within range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogQuery {
    /// Free-text search on the product name.
    #[serde(default)]
    pub search: String,
    /// Selected categories.
    #[serde(default)]
    pub categories: Vec<CategoryId>,
    /// Inclusive lower price bound.
    #[serde(default = "default_price_min")]
    pub price_min: f64,
    /// Inclusive upper price bound.
    #[serde(default = "default_price_max")]
    pub price_max: f64,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_price_min() -> f64 {
    DEFAULT_PRICE_MIN
}

fn default_price_max() -> f64 {
    DEFAULT_PRICE_MAX
}

fn default_page() -> usize {
    1
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: Vec::new(),
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Create a query for the first page with default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Select a category.
    pub fn category(mut self, category: impl Into<CategoryId>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Set the price range.
    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Set the page (values below 1 are treated as 1).
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Select a category if unselected, unselect it otherwise.
    pub fn toggle_category(&mut self, category: impl Into<CategoryId>) {
        let category = category.into();
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    /// Move to the next page.
    pub fn next_page(&mut self) {
        self.page = self.current_page() + 1;
    }

    /// Move to the previous page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.page = self.current_page().saturating_sub(1).max(1);
    }

    /// Page number, never below 1.
    pub fn current_page(&self) -> usize {
        self.page.max(1)
    }

    /// Half-open index window `[start, end)` for the current page.
    pub fn page_range(&self) -> (usize, usize) {
        let page = self.current_page();
        ((page - 1) * PAGE_SIZE, page * PAGE_SIZE)
    }

    /// Number of pages needed for `total` results (at least one).
    pub fn total_pages(total: usize) -> usize {
        total.div_ceil(PAGE_SIZE).max(1)
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, product: &ProductRecord) -> bool {
        let name_ok = name_matches(&product.name, &self.search);
        let category_ok = self.categories.is_empty()
            || product
                .category
                .as_ref()
                .is_some_and(|c| self.categories.contains(c));
        let price_ok = product.price >= self.price_min && product.price <= self.price_max;

        name_ok && category_ok && price_ok
    }

    /// Filter `products` and cut out the current page.
    pub fn apply<'a, I>(&self, products: I) -> Vec<ProductRecord>
    where
        I: IntoIterator<Item = &'a ProductRecord>,
    {
        let (start, _) = self.page_range();
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect()
    }

    /// Cut the current page out of already-filtered results.
    pub fn paginate(&self, products: Vec<ProductRecord>) -> Vec<ProductRecord> {
        let (start, _) = self.page_range();
        products.into_iter().skip(start).take(PAGE_SIZE).collect()
    }

    /// Render the listing query in the content API's query language.
    pub fn to_groq(&self) -> String {
        let mut clauses = vec![format!("_type == {}", quote(DOCUMENT_TYPE))];

        let search = self.search.trim();
        if !search.is_empty() {
            clauses.push(format!("name match {}", quote(&format!("{}*", search))));
        }
        if !self.categories.is_empty() {
            let list = self
                .categories
                .iter()
                .map(|c| quote(c.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            clauses.push(format!("category in [{}]", list));
        }
        clauses.push(format!("price >= {}", self.price_min));
        clauses.push(format!("price <= {}", self.price_max));

        let (start, end) = self.page_range();
        format!(
            "*[{}] {}[{}...{}]",
            clauses.join(" && "),
            PROJECTION,
            start,
            end
        )
    }

    /// Render the single-product lookup used by the detail page.
    pub fn product_by_id_groq(id: &ProductId) -> String {
        format!(
            "*[_type == {} && _id == {}][0] {}",
            quote(DOCUMENT_TYPE),
            quote(id.as_str()),
            PROJECTION
        )
    }
}

/// Quote a string literal for the query language (JSON string syntax).
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Word-prefix match in the style of the content API's `match` operator:
/// every search word must start some word of the name, ignoring case.
fn name_matches(name: &str, search: &str) -> bool {
    let name_words = words(name);
    words(search)
        .iter()
        .all(|term| name_words.iter().any(|w| w.starts_with(term.as_str())))
}

fn words(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ProductRecord> {
        (1..=20)
            .map(|i| {
                let category = if i % 2 == 0 { "Burger" } else { "Drink" };
                ProductRecord::new(format!("food-{}", i), format!("Item {}", i), i as f64 * 5.0)
                    .with_category(category)
            })
            .collect()
    }

    #[test]
    fn test_defaults() {
        let q = CatalogQuery::new();
        assert_eq!(q.page_range(), (0, 9));
        assert_eq!(q.price_min, 0.0);
        assert_eq!(q.price_max, 100.0);
    }

    #[test]
    fn test_page_range() {
        assert_eq!(CatalogQuery::new().page(3).page_range(), (18, 27));
        assert_eq!(CatalogQuery::new().page(0).page_range(), (0, 9));
    }

    #[test]
    fn test_page_navigation() {
        let mut q = CatalogQuery::new();
        q.prev_page();
        assert_eq!(q.page, 1);
        q.next_page();
        q.next_page();
        assert_eq!(q.page, 3);
        q.prev_page();
        assert_eq!(q.page, 2);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(CatalogQuery::total_pages(0), 1);
        assert_eq!(CatalogQuery::total_pages(9), 1);
        assert_eq!(CatalogQuery::total_pages(10), 2);
    }

    #[test]
    fn test_toggle_category() {
        let mut q = CatalogQuery::new();
        q.toggle_category("Burger");
        q.toggle_category("Drink");
        q.toggle_category("Burger");
        assert_eq!(q.categories, vec![CategoryId::new("Drink")]);
    }

    #[test]
    fn test_name_matching() {
        assert!(name_matches("Chicken Burger", ""));
        assert!(name_matches("Chicken Burger", "chick"));
        assert!(name_matches("Chicken Burger", "bur"));
        assert!(name_matches("Chicken Burger", "chicken bu"));
        assert!(!name_matches("Chicken Burger", "icken"));
        assert!(!name_matches("Chicken Burger", "pizza"));
    }

    #[test]
    fn test_filters_combine_conjunctively() {
        let burger = ProductRecord::new("b", "Chicken Burger", 20.0).with_category("Burger");
        let cola = ProductRecord::new("c", "Cola", 3.0).with_category("Drink");

        // Category alone narrows the listing even with an empty search.
        let drinks = CatalogQuery::new().category("Drink");
        assert!(!drinks.matches(&burger));
        assert!(drinks.matches(&cola));

        // A name match does not rescue a product outside the selected categories.
        let q = CatalogQuery::new().search("chicken").category("Drink");
        assert!(!q.matches(&burger));
        assert!(!q.matches(&cola));

        let q = CatalogQuery::new().search("chicken").category("Burger").price_range(0.0, 10.0);
        assert!(!q.matches(&burger));

        let groq = CatalogQuery::new().search("chicken").category("Burger").to_groq();
        assert!(groq.contains(r#"name match "chicken*" && category in ["Burger"]"#));
        assert!(!groq.contains("||"));
    }

    #[test]
    fn test_apply_filters_and_paginates() {
        let products = catalog();

        let page = CatalogQuery::new().apply(&products);
        assert_eq!(page.len(), PAGE_SIZE);

        let burgers = CatalogQuery::new().category("Burger").apply(&products);
        assert!(burgers.iter().all(|p| p.category_name() == "Burger"));

        let cheap = CatalogQuery::new().price_range(10.0, 20.0).apply(&products);
        let prices: Vec<f64> = cheap.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 15.0, 20.0]);

        // 20 products, 5.0..=100.0 all in the default range.
        let last = CatalogQuery::new().page(3).apply(&products);
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn test_groq_rendering() {
        let q = CatalogQuery::new()
            .search("chick")
            .category("Burger")
            .price_range(5.0, 50.0)
            .page(2);
        let groq = q.to_groq();

        assert!(groq.starts_with(r#"*[_type == "food" && name match "chick*" && category in ["Burger"]"#));
        assert!(groq.contains("price >= 5 && price <= 50]"));
        assert!(groq.contains("image { asset -> { url } }"));
        assert!(groq.ends_with("[9...18]"));
    }

    #[test]
    fn test_groq_escapes_literals() {
        let groq = CatalogQuery::new().search(r#"x" || true || ""#).to_groq();
        assert!(groq.contains(r#"name match "x\" || true || \"*""#));
    }

    #[test]
    fn test_groq_by_id() {
        let groq = CatalogQuery::product_by_id_groq(&ProductId::new("food-1"));
        assert!(groq.starts_with(r#"*[_type == "food" && _id == "food-1"][0] {"#));
    }
}
