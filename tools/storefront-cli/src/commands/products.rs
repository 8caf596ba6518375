//! Product lookups against the commerce backend.

use anyhow::{Context as _, Result};
use storefront_backend::ProductListParams;
use storefront_commerce::{CategoryId, CollectionId, ProductId};

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{price_cell, stock_label};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List {
            q,
            collections,
            categories,
            tags,
            limit,
            offset,
            order,
        } => {
            let params = ProductListParams {
                q,
                collection_id: collections.into_iter().map(CollectionId::new).collect(),
                category_id: categories.into_iter().map(CategoryId::new).collect(),
                tags,
                limit: Some(limit),
                offset: Some(offset),
                order,
                expand: None,
            };
            list_products(&params, ctx).await
        }
        ProductsCommand::Get { id } => show_product(&ProductId::new(id), ctx).await,
    }
}

async fn list_products(params: &ProductListParams, ctx: &Context) -> Result<()> {
    let client = ctx.commerce_client()?;

    let spinner = ctx.output.spinner("Fetching products...");
    let page = client.list_products(params).await;
    spinner.finish_and_clear();
    let page = page.context("Could not list products")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Products");
    if page.products.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let table = ctx
        .output
        .table(&[("ID", 28), ("TITLE", 30), ("PRICE", 18), ("STOCK", 10)]);
    for product in &page.products {
        let price = price_cell(product.lowest_price());
        table.row(&[
            product.id.as_str(),
            product.title.as_str(),
            price.as_str(),
            stock_label(product.in_stock()),
        ]);
    }

    println!();
    ctx.output.info(&format!(
        "{} of {} (offset {})",
        page.products.len(),
        page.count,
        page.offset
    ));
    Ok(())
}

async fn show_product(id: &ProductId, ctx: &Context) -> Result<()> {
    let client = ctx.commerce_client()?;
    if !id.has_expected_prefix() {
        ctx.output.warn(&format!(
            "{} does not look like a product id (expected {}...)",
            id,
            ProductId::PREFIX
        ));
    }

    let spinner = ctx.output.spinner("Fetching product...");
    let product = client.retrieve_product(id).await;
    spinner.finish_and_clear();
    let product = product.with_context(|| format!("Could not fetch product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("handle", &product.handle);
    if let Some(status) = &product.status {
        ctx.output.kv("status", status);
    }
    if let Some(subtitle) = &product.subtitle {
        ctx.output.kv("subtitle", subtitle);
    }
    if let Some(collection) = &product.collection {
        ctx.output.kv("collection", &collection.title);
    }
    if !product.categories.is_empty() {
        let names: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
        ctx.output.kv("categories", &names.join(", "));
    }
    if !product.tags.is_empty() {
        let tags: Vec<&str> = product.tags.iter().map(|t| t.value.as_str()).collect();
        ctx.output.kv("tags", &tags.join(", "));
    }
    if let Some(created) = product.created_at {
        ctx.output.kv("created", &created.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    ctx.output.kv("price", &price_cell(product.lowest_price()));
    if let Some(description) = &product.description {
        ctx.output.kv("description", description);
    }

    if !product.variants.is_empty() {
        ctx.output.header("Variants");
        let table = ctx.output.table(&[
            ("ID", 28),
            ("TITLE", 20),
            ("SKU", 16),
            ("PRICE", 14),
            ("STOCK", 8),
        ]);
        for variant in &product.variants {
            let price = variant
                .prices
                .iter()
                .min_by_key(|p| p.amount)
                .map(|p| p.display())
                .unwrap_or_else(|| "-".to_string());
            let stock = variant
                .inventory_quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| "-".to_string());
            table.row(&[
                variant.id.as_str(),
                variant.title.as_str(),
                variant.sku.as_deref().unwrap_or("-"),
                price.as_str(),
                stock.as_str(),
            ]);
        }
    }

    Ok(())
}
