//! Checkout summary command.

use anyhow::{Context as _, Result};
use dialoguer::Input;
use pantry_commerce::checkout::{OrderSummary, ShippingDetails};

use super::CheckoutArgs;
use crate::context::Context;

/// Show the order summary for the current cart.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let mut summary = OrderSummary::from_cart(&cart, &ctx.pricing());

    let details = if let Some(path) = &args.shipping {
        Some(load_shipping(&ctx.resolve_path(path).to_string_lossy())?)
    } else if args.interactive {
        Some(prompt_shipping()?)
    } else {
        None
    };
    if let Some(details) = details.filter(|d| !d.is_blank()) {
        summary = summary.with_shipping_details(details);
    }

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Order Summary");

    if summary.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    for line in &summary.lines {
        ctx.output.total_row(&line.name, &line.display(), false);
    }
    ctx.output.info("");
    for (label, value) in summary.rows() {
        ctx.output.total_row(label, &value, label == "Total");
    }

    if let Some(ship_to) = &summary.ship_to {
        ctx.output.header("Ship To");
        ctx.output.kv("Name", &ship_to.full_name());
        if !ship_to.company.is_empty() {
            ctx.output.kv("Company", &ship_to.company);
        }
        ctx.output.kv("Address", &ship_to.one_line());
        ctx.output.kv("Email", &ship_to.email);
        ctx.output.kv("Phone", &ship_to.phone);
    }

    Ok(())
}

/// Read shipping details from a JSON file using the form's field names.
fn load_shipping(path: &str) -> Result<ShippingDetails> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shipping details: {}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse shipping details: {}", path))
}

fn prompt_shipping() -> Result<ShippingDetails> {
    let mut details = ShippingDetails::default();
    for field in ShippingDetails::FIELDS {
        let value: String = Input::new()
            .with_prompt(field)
            .allow_empty(true)
            .interact_text()?;
        details.set_field(field, value);
    }
    Ok(details)
}
