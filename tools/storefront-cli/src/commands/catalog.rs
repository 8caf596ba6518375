//! Collections and categories.

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::Category;

use super::CategoriesArgs;
use crate::context::Context;

/// Run the collections command.
pub async fn collections(ctx: &Context) -> Result<()> {
    let client = ctx.commerce_client()?;

    let spinner = ctx.output.spinner("Fetching collections...");
    let list = client.list_collections().await;
    spinner.finish_and_clear();
    let list = list.context("Could not list collections")?;

    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    ctx.output.header("Collections");
    if list.collections.is_empty() {
        ctx.output.info("No collections found.");
        return Ok(());
    }

    let table = ctx
        .output
        .table(&[("ID", 28), ("TITLE", 30), ("HANDLE", 24)]);
    for collection in &list.collections {
        table.row(&[
            collection.id.as_str(),
            collection.title.as_str(),
            collection.handle.as_str(),
        ]);
    }
    Ok(())
}

/// Run the categories command.
pub async fn categories(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.commerce_client()?;

    let spinner = ctx.output.spinner("Fetching categories...");
    let list = client.list_categories().await;
    spinner.finish_and_clear();
    let list = list.context("Could not list categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&list);
        return Ok(());
    }

    ctx.output.header("Categories");
    let lines = if args.flat {
        flat_lines(&list.product_categories)
    } else {
        tree_lines(&list.product_categories)
    };
    if lines.is_empty() {
        ctx.output.info("No categories found.");
    }
    for line in lines {
        ctx.output.list_item(&line);
    }
    Ok(())
}

fn describe(category: &Category) -> String {
    format!("{} ({})", category.name, category.handle)
}

fn flat_lines(categories: &[Category]) -> Vec<String> {
    categories.iter().map(describe).collect()
}

/// Roots with their expanded children indented beneath. Falls back to the
/// flat list when the response has no roots.
fn tree_lines(categories: &[Category]) -> Vec<String> {
    let roots: Vec<&Category> = categories.iter().filter(|c| c.is_root()).collect();
    if roots.is_empty() {
        return flat_lines(categories);
    }
    roots
        .into_iter()
        .flat_map(|root| root.walk())
        .map(|(depth, category)| format!("{}{}", "  ".repeat(depth), describe(category)))
        .collect()
}
