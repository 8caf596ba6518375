//! Filter options seeded from the search index.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_commerce::search::{FacetOption, SEED_FACETS};

use super::FacetsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct FacetGroup {
    field: String,
    options: Vec<FacetOption>,
}

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.filter_store()?;

    let spinner = ctx.output.spinner("Loading filter options...");
    let seeded = store.initialize().await;
    spinner.finish_and_clear();
    seeded.context("Failed to load filter options")?;

    let fields: Vec<String> = match args.field {
        Some(field) => vec![field],
        None => SEED_FACETS.iter().map(|f| f.to_string()).collect(),
    };

    let groups: Vec<FacetGroup> = fields
        .into_iter()
        .map(|field| FacetGroup {
            options: store.facet_options_for(&field),
            field,
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&groups);
        return Ok(());
    }

    for group in &groups {
        ctx.output.header(&group.field);
        if group.options.is_empty() {
            ctx.output.info("No values.");
            continue;
        }
        let table = ctx
            .output
            .table(&[("LABEL", 28), ("VALUE", 28), ("COUNT", 8)]);
        for option in &group.options {
            let count = option.count.to_string();
            table.row(&[option.label.as_str(), option.value.as_str(), count.as_str()]);
        }
    }

    Ok(())
}
