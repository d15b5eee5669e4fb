//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Match product names by word prefix.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Restrict to a category (repeatable).
    #[arg(short = 'C', long)]
    pub category: Vec<String>,

    /// Minimum price.
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum price.
    #[arg(long)]
    pub max: Option<f64>,

    /// Page number, starting at 1.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Print the content API query instead of running it.
    #[arg(long)]
    pub groq: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id.
    pub id: String,

    /// Quantity to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,

    /// Override the configured price policy (freeze_first, overwrite).
    #[arg(long)]
    pub policy: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// JSON file with shipping details.
    #[arg(short, long)]
    pub shipping: Option<String>,

    /// Prompt for shipping details.
    #[arg(short, long, conflicts_with = "shipping")]
    pub interactive: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default pantry.toml.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
