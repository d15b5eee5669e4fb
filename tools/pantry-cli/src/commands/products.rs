//! Catalog browsing commands.

use anyhow::Result;
use pantry_commerce::catalog::{
    Catalog, CatalogQuery, ProductDetail, DEFAULT_PRICE_MAX, DEFAULT_PRICE_MIN,
};
use pantry_commerce::money::format_price;
use pantry_commerce::ProductId;

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{availability_badge, truncate};

/// Build the listing query from command-line filters.
fn build_query(args: &ProductsArgs) -> CatalogQuery {
    let mut query = CatalogQuery::new().page(args.page);
    if let Some(search) = &args.search {
        query = query.search(search.as_str());
    }
    for category in &args.category {
        query = query.category(category.as_str());
    }
    if args.min.is_some() || args.max.is_some() {
        query = query.price_range(
            args.min.unwrap_or(DEFAULT_PRICE_MIN),
            args.max.unwrap_or(DEFAULT_PRICE_MAX),
        );
    }
    query
}

/// List one page of products.
pub async fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args);

    if args.groq {
        println!("{}", query.to_groq());
        return Ok(());
    }

    let catalog = ctx.catalog()?;
    let products = catalog.search(&query).await?;
    let total = catalog.count(&query);
    let pages = CatalogQuery::total_pages(total);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "page": query.current_page(),
            "total_pages": pages,
            "total": total,
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header("Products");

    if products.is_empty() {
        ctx.output.info("No products match the current filters");
        return Ok(());
    }

    let widths = [12, 28, 14, 12, 10];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STATUS"], &widths);
    for product in &products {
        let id = truncate(product.id.as_str(), widths[0]);
        let name = truncate(&product.name, widths[1]);
        let category = truncate(product.category_name(), widths[2]);
        let price = format_price(product.price);
        let badge = availability_badge(product.available);
        ctx.output.table_row(
            &[
                id.as_str(),
                name.as_str(),
                category.as_str(),
                price.as_str(),
                badge.as_str(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Page {} of {} ({} products)",
        query.current_page(),
        pages,
        total
    ));
    ctx.output
        .debug(&format!("Categories: {}", catalog.categories().join(", ")));

    Ok(())
}

/// Show one product.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let lookup = catalog.product(&ProductId::new(args.id.as_str())).await;
    let detail = ProductDetail::from_lookup(lookup);

    let Some(product) = detail.product() else {
        anyhow::bail!("Product not found: {}", args.id);
    };

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Category", product.category_name());
    ctx.output.kv("Price", &format_price(product.price));
    if let Some(original) = product.original_price.filter(|_| product.is_on_sale()) {
        ctx.output.kv("Was", &format_price(original));
    }
    ctx.output.kv("Status", &availability_badge(product.available));
    if !product.tags.is_empty() {
        ctx.output.kv("Tags", &product.tags.join(", "));
    }
    if let Some(url) = product.image_url() {
        ctx.output.kv("Image", url);
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }

    Ok(())
}
