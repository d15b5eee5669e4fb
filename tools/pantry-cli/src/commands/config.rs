//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Store section
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("dir", &ctx.config.store.dir);
    ctx.output.kv(
        "resolved",
        &ctx.resolve_path(&ctx.config.store.dir).display().to_string(),
    );

    // Pricing section
    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output
        .kv("discount_rate", &pricing.options().discount_rate.to_string());
    ctx.output.kv("tax_rate", &pricing.options().tax_rate.to_string());
    ctx.output.kv("price_policy", pricing.price_policy.as_str());

    // Catalog section
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "products",
        ctx.config.catalog.products.as_deref().unwrap_or("(not set)"),
    );

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("pantry.toml");

    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.info("Validating configuration...");

    // Context::load already rejected unusable values; these only warn.
    let mut warnings = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push("No config file found; using defaults".to_string());
    }

    match &ctx.config.catalog.products {
        None => warnings.push("[catalog] products is not set".to_string()),
        Some(products) => {
            let path = ctx.resolve_path(products);
            if !path.is_file() {
                warnings.push(format!("Catalog file not found: {}", path.display()));
            }
        }
    }

    if ctx.config.pricing.options().discount_rate == 0.0 {
        warnings.push("discount_rate is 0; no discount will be applied".to_string());
    }

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "valid": true, "warnings": warnings }));
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(warning);
    }
    ctx.output.success("Configuration is valid");

    Ok(())
}
