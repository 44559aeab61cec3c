//! Stock CLI - inventory dashboard reads from the terminal.
//!
//! Commands:
//! - `stock products` - Search, filter and page through the catalog
//! - `stock product` - Show one product
//! - `stock categories` - List categories
//! - `stock metrics` - Availability status breakdown
//! - `stock low-stock` - Products running low, lowest stock first
//! - `stock order` - Log a quick order
//! - `stock config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, OrderArgs, ProductArgs, ProductsArgs};

/// Stock CLI - Query the inventory catalog
#[derive(Parser)]
#[command(name = "stock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show a single product
    Product(ProductArgs),

    /// List product categories
    Categories,

    /// Show availability status counts and percentages
    Metrics,

    /// List low-stock products
    LowStock,

    /// Log a quick order for a product
    Order(OrderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Product(args) => commands::catalog::product(args, &ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Metrics => commands::catalog::metrics(&ctx).await,
        Commands::LowStock => commands::catalog::low_stock(&ctx).await,
        Commands::Order(args) => commands::catalog::order(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
