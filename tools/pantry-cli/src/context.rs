//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use pantry_cache::FileStore;
use pantry_commerce::cart::{CartLedger, PricingOptions};
use pantry_commerce::catalog::JsonCatalog;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Path the config was loaded from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        config.validate()?;

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %format!("{:#}", e),
                            "skipping unreadable config"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the cart from the configured store.
    pub fn open_cart(&self) -> Result<CartLedger<FileStore>> {
        let dir = self.resolve_path(&self.config.store.dir);
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart store at {}", dir.display()))?;
        Ok(CartLedger::load_with_policy(
            store,
            self.config.pricing.price_policy,
        ))
    }

    /// Load the configured product catalog.
    pub fn catalog(&self) -> Result<JsonCatalog> {
        let Some(products) = &self.config.catalog.products else {
            bail!("No catalog configured; set [catalog] products in pantry.toml");
        };
        let path = self.resolve_path(products);
        JsonCatalog::from_file(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))
    }

    /// Checkout pricing options.
    pub fn pricing(&self) -> PricingOptions {
        self.config.pricing.options()
    }

    /// Resolve a path relative to the config file's directory, or the working
    /// directory when no config file was found.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            return path;
        }
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone());
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config_path: Option<PathBuf>, cwd: PathBuf) -> Context {
        Context {
            config: CliConfig::default(),
            config_path,
            output: Output::new(false, true),
            cwd,
        }
    }

    #[test]
    fn test_resolve_relative_to_config() {
        let ctx = context(Some(PathBuf::from("/shop/pantry.toml")), PathBuf::from("/work"));
        assert_eq!(ctx.resolve_path(".pantry"), PathBuf::from("/shop/.pantry"));
        assert_eq!(ctx.resolve_path("/abs/x"), PathBuf::from("/abs/x"));
    }

    #[test]
    fn test_resolve_relative_to_cwd() {
        let ctx = context(None, PathBuf::from("/work"));
        assert_eq!(ctx.resolve_path("products.json"), PathBuf::from("/work/products.json"));

        let bare = context(Some(PathBuf::from("pantry.toml")), PathBuf::from("/work"));
        assert_eq!(bare.resolve_path(".pantry"), PathBuf::from("/work/.pantry"));
    }

    #[test]
    fn test_open_cart_persists_in_store_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(None, dir.path().to_path_buf());

        let mut cart = ctx.open_cart().unwrap();
        cart.add_or_merge("f1", "Burger", 21.0, "", 1).unwrap();
        assert!(dir.path().join(".pantry").join("cart.json").is_file());

        assert_eq!(ctx.open_cart().unwrap().len(), 1);
    }

    #[test]
    fn test_catalog_requires_config() {
        let ctx = context(None, PathBuf::from("/work"));
        assert!(ctx.catalog().is_err());
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pantry.toml"), "[store]\ndir = \"state\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.dir, "state");
        assert_eq!(path, dir.path().join("pantry.toml"));
    }
}
