//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod facets;
pub mod products;
pub mod search;

use clap::{Args, Subcommand};
use storefront_commerce::search::SortOption;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query.
    #[arg(default_value = "")]
    pub query: String,

    /// Category handle (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Collection handle (repeatable).
    #[arg(long = "collection")]
    pub collections: Vec<String>,

    /// Tag value (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Minimum price in minor units.
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Maximum price in minor units.
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Only products with stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order: created_at, updated_at, title, price_asc, price_desc.
    #[arg(short, long)]
    pub sort: Option<SortOption>,

    /// Page number (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Show a single facet field (e.g. tags.value).
    #[arg(short, long)]
    pub field: Option<String>,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products.
    List {
        /// Free-text query.
        #[arg(short, long)]
        q: Option<String>,

        /// Collection ID (repeatable).
        #[arg(long = "collection")]
        collections: Vec<String>,

        /// Category ID (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Tag (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Maximum number of products.
        #[arg(short, long, default_value = "20")]
        limit: u32,

        /// Number of products to skip.
        #[arg(long, default_value = "0")]
        offset: u32,

        /// Sort field, `-` prefixed for descending.
        #[arg(long)]
        order: Option<String>,
    },
    /// Show one product.
    Get {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Print a flat list instead of a tree.
    #[arg(long)]
    pub flat: bool,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}
