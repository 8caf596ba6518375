//! Store, gateway and request translation working together.

mod common;

use common::{result_with, ControlledGateway};
use storefront_commerce::search::{
    FacetCounts, FacetDistribution, FilterUpdate, PriceRange, SearchRequest, SetField,
};
use storefront_search::SearchError;
use storefront_state::{FilterStore, SearchOutcome, SEARCH_FAILED_MESSAGE};

#[tokio::test]
async fn test_default_search_request() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let command = store.retry();
    let request = command.request.to_request();
    assert_eq!(request.filter, None);
    assert_eq!(request.offset, 0);
    assert_eq!(request.limit, 20);
    assert_eq!(request.sort, vec!["created_at:desc".to_string()]);

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.execute(command).await }
    });
    let pending = searches.recv().await.unwrap();
    assert_eq!(pending.query, "");
    assert_eq!(pending.page, 1);
    assert_eq!(pending.page_size, 20);
    assert!(!pending.selection.has_active_filters());
    assert!(store.is_loading());

    pending.respond(Ok(result_with(&["Trail Boot"], 1)));
    assert_eq!(task.await.unwrap(), SearchOutcome::Applied);
}

#[tokio::test]
async fn test_filtered_search_translates_to_expression() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let _ = store.add_to_set(SetField::Categories, "shoes");
    let _ = store.add_to_set(SetField::Categories, "bags");
    let _ = store.set_filter(FilterUpdate::PriceRange(Some(PriceRange::new(1000, 5000))));
    let command = store.set_filter(FilterUpdate::InStock(Some(true)));

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.execute(command).await }
    });
    let pending = searches.recv().await.unwrap();
    let request = SearchRequest::for_selection(
        pending.query.clone(),
        &pending.selection,
        pending.page,
        pending.page_size,
    );
    assert_eq!(
        request.filter.as_deref(),
        Some(
            r#"(categories.handle = "shoes" OR categories.handle = "bags") AND variants.prices.amount >= 1000 AND variants.prices.amount <= 5000 AND variants.inventory_quantity > 0"#
        )
    );

    pending.respond(Ok(result_with(&[], 0)));
    task.await.unwrap();
}

#[tokio::test]
async fn test_failure_after_success_empties_results() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let first = tokio::spawn({
        let store = store.clone();
        let command = store.retry();
        async move { store.execute(command).await }
    });
    searches
        .recv()
        .await
        .unwrap()
        .respond(Ok(result_with(&["Trail Boot", "Canvas Bag"], 57)));
    first.await.unwrap();
    assert_eq!(store.total_hits(), 57);

    let command = store.set_page(2);
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.execute(command).await }
    });
    let pending = searches.recv().await.unwrap();
    assert!(store.is_loading());
    pending.respond(Err(SearchError::Service {
        status: 503,
        message: "unavailable".to_string(),
    }));
    assert_eq!(second.await.unwrap(), SearchOutcome::Failed);

    let snap = store.snapshot();
    assert!(!snap.is_loading);
    assert!(snap.results.is_empty());
    assert_eq!(snap.total_hits, 0);
    assert_eq!(snap.last_error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
    // The page the shopper asked for is kept for a retry.
    assert_eq!(snap.page, 2);

    let retry = store.retry();
    assert_eq!(retry.request.page, 2);
}

#[tokio::test]
async fn test_seeded_facet_options_keep_service_order() {
    let counts: FacetCounts = [("new_arrival", 3u64), ("best-seller", 1)].into_iter().collect();
    let facets: FacetDistribution = [("tags.value", counts)].into_iter().collect();
    let (gateway, _searches) = ControlledGateway::with_facets(Ok(facets));
    let store = FilterStore::new(gateway);

    store.initialize().await.unwrap();
    let options = store.facet_options_for("tags.value");
    let rendered: Vec<(&str, &str, u64)> = options
        .iter()
        .map(|o| (o.label.as_str(), o.value.as_str(), o.count))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("New Arrival", "new_arrival", 3),
            ("Best Seller", "best-seller", 1),
        ]
    );
}
