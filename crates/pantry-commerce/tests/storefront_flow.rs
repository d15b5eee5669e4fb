//! Listing -> detail -> cart -> checkout, end to end.

use pantry_cache::MemoryStore;
use pantry_commerce::prelude::*;

fn catalog() -> JsonCatalog {
    let products: Vec<ProductRecord> = (1..=12)
        .map(|i| {
            let category = if i <= 6 { "Burger" } else { "Drink" };
            ProductRecord::new(format!("f{}", i), format!("Menu Item {}", i), i as f64)
                .with_category(category)
                .with_image_url(format!("https://cdn.example/{}.png", i))
        })
        .collect();
    JsonCatalog::new(products)
}

#[tokio::test]
async fn test_listing_pages_through_catalog() {
    let catalog = catalog();

    let mut query = CatalogQuery::new();
    let first = catalog.search(&query).await.unwrap();
    assert_eq!(first.len(), PAGE_SIZE);

    query.next_page();
    let second = catalog.search(&query).await.unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(CatalogQuery::total_pages(catalog.count(&query)), 2);

    query.toggle_category("Drink");
    query.prev_page();
    let drinks = catalog.search(&query).await.unwrap();
    assert_eq!(drinks.len(), 6);
}

#[tokio::test]
async fn test_detail_to_checkout() {
    let catalog = catalog();
    let mut cart = CartLedger::load(MemoryStore::new());

    let mut detail = ProductDetail::from_lookup(catalog.product(&ProductId::new("f2")).await);
    let stepper = detail.stepper_mut().unwrap();
    stepper.increment();
    stepper.increment();
    stepper.decrement();
    detail.add_to_cart(&mut cart).unwrap();

    let detail = ProductDetail::from_lookup(catalog.product(&ProductId::new("f10")).await);
    detail.add_to_cart(&mut cart).unwrap();
    detail.add_to_cart(&mut cart).unwrap();

    let missing = ProductDetail::from_lookup(catalog.product(&ProductId::new("f99")).await);
    assert!(missing.add_to_cart(&mut cart).is_err());

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.all()[0].quantity, 2);
    assert_eq!(cart.all()[0].image, "https://cdn.example/2.png");
    assert_eq!(cart.all()[1].quantity, 2);

    // 2 x 2.0 + 2 x 10.0
    let summary = OrderSummary::from_cart(&cart, &PricingOptions::default());
    assert_eq!(summary.pricing.subtotal, 24.0);
    assert_eq!(summary.pricing.discount, 6.0);
    assert_eq!(summary.pricing.total, 24.0 - 6.0 + 24.0 * 0.1);
    assert_eq!(summary.rows()[4].1, "\u{20b9}20.40");
}
