//! CLI configuration.

use anyhow::{Context, Result};
use pantry_commerce::cart::{PricePolicy, PricingOptions};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["pantry.toml", ".pantry.toml", "pantry.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Checkout pricing.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Product catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        Ok(config)
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        self.pricing
            .options()
            .validate()
            .context("Invalid [pricing] section")?;
        if self.store.dir.trim().is_empty() {
            anyhow::bail!("[store] dir must not be empty");
        }
        Ok(())
    }
}

/// Where the cart snapshot is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the key-value files.
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

fn default_store_dir() -> String {
    ".pantry".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Checkout pricing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Discount and tax rates.
    #[serde(flatten)]
    pub rates: PricingOptions,

    /// Unit price rule for repeated adds.
    #[serde(default)]
    pub price_policy: PricePolicy,
}

impl PricingConfig {
    /// Aggregator options.
    pub fn options(&self) -> PricingOptions {
        self.rates
    }
}

/// Product catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file with product records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
}

/// Generate a default pantry.toml config file.
pub fn generate_default_config() -> String {
    r#"# Pantry storefront configuration

[store]
# Directory for the cart snapshot (one JSON file per key).
dir = ".pantry"

[pricing]
discount_rate = 0.25
tax_rate = 0.10
# "freeze_first" keeps the first unit price on repeated adds; "overwrite" reprices.
price_policy = "freeze_first"

[catalog]
# Product records exported from the content API.
products = "products.json"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.dir, ".pantry");
        assert_eq!(config.pricing.options(), PricingOptions::default());
        assert_eq!(config.pricing.price_policy, PricePolicy::FreezeFirst);
        assert_eq!(config.catalog.products.as_deref(), Some("products.json"));
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.dir, ".pantry");
        assert_eq!(config.pricing.options().discount_rate, 0.25);
        assert!(config.catalog.products.is_none());
    }

    #[test]
    fn test_partial_pricing_section() {
        let config: CliConfig =
            toml::from_str("[pricing]\ntax_rate = 0.05\nprice_policy = \"overwrite\"\n").unwrap();
        assert_eq!(config.pricing.options().tax_rate, 0.05);
        assert_eq!(config.pricing.options().discount_rate, 0.25);
        assert_eq!(config.pricing.price_policy, PricePolicy::Overwrite);
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let config: CliConfig = toml::from_str("[pricing]\ndiscount_rate = 1.5\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pantry.json");
        std::fs::write(&path, r#"{"pricing":{"price_policy":"overwrite"}}"#).unwrap();

        let loaded = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.pricing.price_policy, PricePolicy::Overwrite);
        assert_eq!(loaded.store.dir, ".pantry");
    }
}
