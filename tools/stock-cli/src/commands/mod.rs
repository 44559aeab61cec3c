//! CLI command implementations.

pub mod catalog;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Case-insensitive title search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only products in this category.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of matches to skip.
    #[arg(long, default_value = "0")]
    pub skip: usize,

    /// Page size.
    #[arg(short, long, default_value = "30")]
    pub limit: usize,

    /// Return every match in one page.
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Product ID.
    pub id: String,

    /// Quantity to order.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (e.g. upstream_base_url).
        key: String,
    },
    /// Set a config value in the config file.
    Set {
        /// Config key (e.g. upstream_base_url).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
