//! Product search.

use anyhow::{anyhow, Result};
use serde::Serialize;
use storefront_commerce::search::{
    FilterUpdate, PriceRange, SetField, SEARCH_FACETS,
};
use storefront_observability::MetricsSnapshot;
use storefront_search::SearchGateway;
use storefront_state::{FilterStore, SearchCommand, SearchOutcome, SearchSnapshot};

use super::SearchArgs;
use crate::context::Context;
use crate::output::{price_cell, stock_label};

/// Facet values listed per field in text output.
const FACET_PREVIEW: usize = 5;

#[derive(Serialize)]
struct SearchReport<'a> {
    #[serde(flatten)]
    snapshot: &'a SearchSnapshot,
    total_pages: u64,
    metrics: MetricsSnapshot,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let store = ctx.filter_store()?;
    let command = apply_args(&store, &args);
    ctx.output.debug(&format!(
        "Search {}: filter {}",
        command.generation,
        command
            .request
            .to_request()
            .filter
            .unwrap_or_else(|| "(none)".to_string())
    ));

    let spinner = ctx.output.spinner("Searching...");
    let outcome = store.execute(command).await;
    spinner.finish_and_clear();

    let snapshot = store.snapshot();
    if ctx.output.is_json() {
        ctx.output.json(&SearchReport {
            snapshot: &snapshot,
            total_pages: snapshot.total_pages(),
            metrics: store.metrics(),
        });
    }

    if outcome == SearchOutcome::Failed {
        let message = snapshot
            .last_error
            .unwrap_or_else(|| "Search failed".to_string());
        return Err(anyhow!(message));
    }

    if !ctx.output.is_json() {
        print_results(&snapshot, ctx);
        print_facets(&snapshot, ctx);
    }

    if ctx.output.is_verbose() {
        for line in store.metrics().to_summary().lines() {
            ctx.output.debug(line);
        }
    }

    Ok(())
}

/// Replay the command-line filters as store mutations. Only the command of
/// the last mutation is returned; it carries the complete selection.
pub fn apply_args<G: SearchGateway>(store: &FilterStore<G>, args: &SearchArgs) -> SearchCommand {
    let mut command = store.set_query(args.query.trim());

    let sets = [
        (SetField::Categories, &args.categories),
        (SetField::Collections, &args.collections),
        (SetField::Tags, &args.tags),
    ];
    for (field, values) in sets {
        for value in values {
            command = store.add_to_set(field, value.as_str());
        }
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        command = store.set_filter(FilterUpdate::PriceRange(Some(PriceRange {
            min: args.min_price,
            max: args.max_price,
        })));
    }
    if args.in_stock {
        command = store.set_filter(FilterUpdate::InStock(Some(true)));
    }
    if let Some(sort) = args.sort {
        command = store.set_filter(FilterUpdate::SortBy(Some(sort)));
    }
    if args.page != 1 {
        command = store.set_page(args.page);
    }
    command
}

fn print_results(snapshot: &SearchSnapshot, ctx: &Context) {
    let title = if snapshot.query.is_empty() {
        "All products".to_string()
    } else {
        format!("Results for \"{}\"", snapshot.query)
    };
    ctx.output.header(&title);

    if snapshot.results.is_empty() {
        let pages = snapshot.total_pages();
        if pages > 0 && u64::from(snapshot.page) > pages {
            ctx.output.info(&format!(
                "Page {} is past the last page ({}).",
                snapshot.page, pages
            ));
        } else {
            ctx.output.info("No products match.");
        }
        return;
    }

    let table = ctx
        .output
        .table(&[("TITLE", 32), ("PRICE", 18), ("STOCK", 10), ("HANDLE", 24)]);
    for hit in &snapshot.results {
        let price = price_cell(hit.lowest_price());
        table.row(&[
            hit.title.as_str(),
            price.as_str(),
            stock_label(hit.in_stock()),
            hit.handle.as_str(),
        ]);
    }

    let pagination = snapshot.pagination();
    println!();
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));
}

fn print_facets(snapshot: &SearchSnapshot, ctx: &Context) {
    if snapshot.facet_counts.is_empty() {
        return;
    }
    ctx.output.header("Refine");
    for field in SEARCH_FACETS {
        let options = snapshot.facet_options_for(field);
        if options.is_empty() {
            continue;
        }
        let preview: Vec<String> = options
            .iter()
            .take(FACET_PREVIEW)
            .map(|o| format!("{} ({})", o.label, o.count))
            .collect();
        let more = options.len().saturating_sub(FACET_PREVIEW);
        let suffix = if more > 0 {
            format!(", +{} more", more)
        } else {
            String::new()
        };
        ctx.output.kv(field, &format!("{}{}", preview.join(", "), suffix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::search::SortOption;
    use storefront_core::SearchServiceConfig;
    use storefront_search::MeiliSearchGateway;

    fn args() -> SearchArgs {
        SearchArgs {
            query: String::new(),
            categories: Vec::new(),
            collections: Vec::new(),
            tags: Vec::new(),
            min_price: None,
            max_price: None,
            in_stock: false,
            sort: None,
            page: 1,
        }
    }

    fn store() -> FilterStore<MeiliSearchGateway> {
        FilterStore::new(MeiliSearchGateway::new(&SearchServiceConfig::default()).unwrap())
    }

    #[test]
    fn test_no_args_is_default_search() {
        let command = apply_args(&store(), &args());
        let request = command.request.to_request();
        assert_eq!(request.q, "");
        assert_eq!(request.filter, None);
        assert_eq!(request.offset, 0);
    }

    #[test]
    fn test_args_become_one_selection() {
        let mut a = args();
        a.query = " boot ".to_string();
        a.categories = vec!["shoes".to_string(), "bags".to_string()];
        a.tags = vec!["sale".to_string()];
        a.min_price = Some(1000);
        a.in_stock = true;
        a.sort = Some(SortOption::PriceDesc);
        a.page = 3;

        let command = apply_args(&store(), &a);
        assert_eq!(command.request.page, 3);

        let request = command.request.to_request();
        assert_eq!(request.q, "boot");
        assert_eq!(request.offset, 40);
        assert_eq!(request.sort, vec!["variants.prices.amount:desc".to_string()]);
        assert_eq!(
            request.filter.as_deref(),
            Some(
                r#"(categories.handle = "shoes" OR categories.handle = "bags") AND (tags.value = "sale") AND variants.prices.amount >= 1000 AND variants.inventory_quantity > 0"#
            )
        );
    }
}
