//! Storefront CLI - browse a storefront's catalog from the terminal.
//!
//! Commands:
//! - `storefront search` - Search products with filters, sorting and paging
//! - `storefront facets` - Show filter options and their counts
//! - `storefront products` - List or fetch products from the commerce backend
//! - `storefront collections` - List collections
//! - `storefront categories` - List the category tree
//! - `storefront config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_observability::{init_logging, LogFormat};

use commands::{CategoriesArgs, ConfigArgs, FacetsArgs, ProductsArgs, SearchArgs};

/// Storefront CLI - search and browse a commerce catalog
#[derive(Parser)]
#[command(name = "storefront")]
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
    /// Search products
    Search(SearchArgs),

    /// Show filter options with counts
    Facets(FacetsArgs),

    /// List or fetch products from the commerce backend
    Products(ProductsArgs),

    /// List collections
    Collections,

    /// List product categories
    Categories(CategoriesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let log_format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::detect()
    };
    if let Err(e) = init_logging(log_format, cli.verbose) {
        output.warn(&format!("Logging disabled: {}", e));
    }

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Collections => commands::catalog::collections(&ctx).await,
        Commands::Categories(args) => commands::catalog::categories(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
