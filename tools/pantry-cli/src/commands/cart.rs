//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use pantry_cache::Store;
use pantry_commerce::cart::{CartLedger, PricePolicy};
use pantry_commerce::catalog::{Catalog, ProductDetail};
use pantry_commerce::money::{format_amount, format_price};
use pantry_commerce::ProductId;

use super::{AddArgs, ClearArgs, RemoveArgs};
use crate::context::Context;
use crate::output::{truncate, Output};

/// Add a catalog product to the cart.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    if args.quantity == 0 {
        bail!("Quantity must be at least 1");
    }
    let policy = match args.policy.as_deref() {
        Some(name) => match PricePolicy::from_str(name) {
            Some(policy) => Some(policy),
            None => bail!("Unknown price policy: {}", name),
        },
        None => None,
    };

    let catalog = ctx.catalog()?;
    let lookup = catalog.product(&ProductId::new(args.id.as_str())).await;
    let mut detail = ProductDetail::from_lookup(lookup);

    if let Some(stepper) = detail.stepper_mut() {
        stepper.set(args.quantity);
    }
    let Some(product) = detail.product() else {
        bail!("Product not found: {}", args.id);
    };
    if !product.available {
        ctx.output
            .warn(&format!("{} is marked as sold out", product.name));
    }

    let mut cart = ctx.open_cart()?;
    if let Some(policy) = policy {
        ctx.output.debug(&format!("Using price policy {}", policy.as_str()));
        cart.set_policy(policy);
    }
    let line = detail.add_to_cart(&mut cart)?;

    if ctx.output.is_json() {
        ctx.output.json(line);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Added {} x {} (now {} in cart, {})",
        args.quantity,
        line.name,
        line.quantity,
        format_price(line.total)
    ));
    Ok(())
}

/// Remove a product's line from the cart.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let removed = cart.remove(&ProductId::new(args.id.as_str()));

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "id": args.id, "removed": removed }));
        return Ok(());
    }

    if removed {
        ctx.output.success(&format!("Removed {} from the cart", args.id));
    } else {
        ctx.output.warn(&format!("{} is not in the cart", args.id));
    }
    Ok(())
}

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;

    if ctx.output.is_json() {
        ctx.output.json(&cart.all());
        return Ok(());
    }

    ctx.output.header("Cart");
    print_lines(&cart, &ctx.output);
    Ok(())
}

/// Print the cart lines and the running subtotal.
pub(crate) fn print_lines<S: Store>(cart: &CartLedger<S>, output: &Output) {
    if cart.is_empty() {
        output.info("Your cart is empty");
        return;
    }

    let widths = [12, 28, 6, 12, 12];
    output.table_row(&["ID", "NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for item in cart.all() {
        let id = truncate(item.id.as_str(), widths[0]);
        let name = truncate(&item.name, widths[1]);
        let quantity = item.quantity.to_string();
        let price = format_amount(item.price);
        let total = format_amount(item.total);
        output.table_row(
            &[
                id.as_str(),
                name.as_str(),
                quantity.as_str(),
                price.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }

    output.info("");
    output.total_row(
        &format!("{} items", cart.item_count()),
        &format_price(cart.line_subtotal()),
        true,
    );
}

/// Empty the cart.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if cart.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} lines from the cart?", cart.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    cart.clear();
    ctx.output.success("Cart cleared");
    Ok(())
}
