//! Overlapping searches resolving out of order.

mod common;

use common::{result_with, ControlledGateway};
use futures::future::join_all;
use storefront_commerce::search::SetField;
use storefront_search::SearchError;
use storefront_state::{FilterStore, SearchOutcome};

#[tokio::test]
async fn test_older_response_arriving_last_is_discarded() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    // A is dispatched and left pending.
    let a = store.set_query("boots");
    let task_a = tokio::spawn({
        let store = store.clone();
        async move { store.execute(a).await }
    });
    let pending_a = searches.recv().await.unwrap();
    assert_eq!(pending_a.query, "boots");

    // B is dispatched before A resolves.
    let b = store.set_query("bags");
    let task_b = tokio::spawn({
        let store = store.clone();
        async move { store.execute(b).await }
    });
    let pending_b = searches.recv().await.unwrap();
    assert_eq!(pending_b.query, "bags");

    // B resolves first, then A.
    pending_b.respond(Ok(result_with(&["Canvas Bag"], 1)));
    assert_eq!(task_b.await.unwrap(), SearchOutcome::Applied);
    assert!(!store.is_loading());

    pending_a.respond(Ok(result_with(&["Trail Boot", "Rain Boot"], 2)));
    assert_eq!(task_a.await.unwrap(), SearchOutcome::Superseded);

    let snap = store.snapshot();
    assert_eq!(snap.query, "bags");
    assert_eq!(snap.total_hits, 1);
    assert_eq!(snap.results[0].title, "Canvas Bag");
    assert!(!snap.is_loading);

    let metrics = store.metrics();
    assert_eq!(metrics.dispatched, 2);
    assert_eq!(metrics.applied, 1);
    assert_eq!(metrics.superseded, 1);
}

#[tokio::test]
async fn test_older_response_arriving_first_is_discarded() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let a = store.add_to_set(SetField::Categories, "shoes");
    let task_a = tokio::spawn({
        let store = store.clone();
        async move { store.execute(a).await }
    });
    let pending_a = searches.recv().await.unwrap();

    let b = store.add_to_set(SetField::Categories, "bags");
    let task_b = tokio::spawn({
        let store = store.clone();
        async move { store.execute(b).await }
    });
    let pending_b = searches.recv().await.unwrap();
    assert_eq!(pending_b.selection.values(SetField::Categories).len(), 2);

    pending_a.respond(Ok(result_with(&["Trail Boot"], 1)));
    assert_eq!(task_a.await.unwrap(), SearchOutcome::Superseded);
    // B is still outstanding.
    assert!(store.is_loading());
    assert!(store.results().is_empty());

    pending_b.respond(Ok(result_with(&["Trail Boot", "Canvas Bag"], 2)));
    assert_eq!(task_b.await.unwrap(), SearchOutcome::Applied);
    assert_eq!(store.total_hits(), 2);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_stale_failure_does_not_set_error() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let a = store.set_query("a");
    let task_a = tokio::spawn({
        let store = store.clone();
        async move { store.execute(a).await }
    });
    let pending_a = searches.recv().await.unwrap();

    let b = store.set_query("b");
    let task_b = tokio::spawn({
        let store = store.clone();
        async move { store.execute(b).await }
    });
    let pending_b = searches.recv().await.unwrap();

    pending_b.respond(Ok(result_with(&["Canvas Bag"], 1)));
    task_b.await.unwrap();
    pending_a.respond(Err(SearchError::Transport("connection reset".to_string())));
    assert_eq!(task_a.await.unwrap(), SearchOutcome::Superseded);

    assert!(store.last_error().is_none());
    assert_eq!(store.total_hits(), 1);
}

#[tokio::test]
async fn test_begin_and_complete_halves() {
    let (gateway, _searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let first = store.begin(store.set_query("a")).unwrap();
    let second = store.begin(store.set_query("b")).unwrap();
    assert!(second.generation > first.generation);

    assert_eq!(
        store.complete(&second, Ok(result_with(&["B"], 1))),
        SearchOutcome::Applied
    );
    assert_eq!(
        store.complete(&first, Ok(result_with(&["A"], 1))),
        SearchOutcome::Superseded
    );
    assert_eq!(store.results()[0].title, "B");
}

#[tokio::test]
async fn test_burst_of_mutations_sends_one_search() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    // Typing "boot" one keystroke at a time, executed only afterwards.
    let commands: Vec<_> = ["b", "bo", "boo", "boot"]
        .iter()
        .map(|q| store.set_query(*q))
        .collect();

    let responder = tokio::spawn(async move {
        let pending = searches.recv().await.unwrap();
        let query = pending.query.clone();
        pending.respond(Ok(result_with(&["Trail Boot"], 1)));
        (query, searches.try_recv().is_err())
    });

    let outcomes = join_all(commands.into_iter().map(|c| store.execute(c))).await;
    assert_eq!(
        outcomes,
        vec![
            SearchOutcome::Superseded,
            SearchOutcome::Superseded,
            SearchOutcome::Superseded,
            SearchOutcome::Applied,
        ]
    );

    let (query, no_more) = responder.await.unwrap();
    assert_eq!(query, "boot");
    assert!(no_more);
    assert_eq!(store.metrics().dispatched, 1);
}

#[tokio::test]
async fn test_dropped_newer_command_does_not_leave_store_loading() {
    let (gateway, mut searches) = ControlledGateway::new();
    let store = FilterStore::new(gateway);

    let a = store.set_query("boots");
    let task_a = tokio::spawn({
        let store = store.clone();
        async move { store.execute(a).await }
    });
    let pending_a = searches.recv().await.unwrap();

    // The page changes but its search is never run.
    let _ = store.set_page(2);
    assert!(store.is_loading());

    pending_a.respond(Ok(result_with(&["Trail Boot"], 1)));
    assert_eq!(task_a.await.unwrap(), SearchOutcome::Superseded);

    assert!(!store.is_loading());
    assert_eq!(store.page(), 2);
    assert!(store.results().is_empty());
    assert_eq!(store.metrics().in_flight(), 0);
}
