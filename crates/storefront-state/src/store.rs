//! The filter store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use storefront_commerce::catalog::ProductSummary;
use storefront_commerce::search::{
    FacetDistribution, FacetOption, FilterField, FilterSelection, FilterUpdate, Pagination,
    SearchResult, SetField,
};
use storefront_core::SessionId;
use storefront_observability::{MetricsSnapshot, SearchMetrics};
use storefront_search::{GatewayResult, SearchError, SearchGateway};

use crate::command::{Dispatch, Generation, SearchCommand, SearchOutcome, SearchParams};
use crate::snapshot::SearchSnapshot;

/// Shown when the latest search fails, whatever the cause.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// Shown when the initial facet seed fails.
pub const FACETS_FAILED_MESSAGE: &str = "Failed to load filter options";

#[derive(Debug, Default)]
struct Inner {
    state: SearchSnapshot,
    /// Set once a search response has supplied facet counts, so a late seed
    /// does not overwrite them.
    facets_from_search: bool,
    /// Most recently dispatched generation. May lag `state.generation` when
    /// newer commands were issued but not (yet) run.
    dispatched: Option<Generation>,
}

impl Inner {
    /// Issue a command for the current parameters.
    fn issue(&mut self) -> SearchCommand {
        self.state.generation = self.state.generation.next();
        SearchCommand {
            generation: self.state.generation,
            request: SearchParams {
                query: self.state.query.clone(),
                selection: self.state.selection.clone(),
                page: self.state.page,
                page_size: self.state.page_size,
            },
        }
    }

    /// Mutation that changes what is searched: back to page 1.
    fn reset_and_issue(&mut self) -> SearchCommand {
        self.state.page = 1;
        self.issue()
    }
}

/// Single owner of one session's query, filters, page and results.
///
/// Every method takes `&self`; clones share the same state, so several
/// searches can be in flight from different tasks. The gateway is injected.
pub struct FilterStore<G: SearchGateway> {
    gateway: Arc<G>,
    inner: Arc<Mutex<Inner>>,
    metrics: Arc<SearchMetrics>,
    session: SessionId,
}

impl<G: SearchGateway> Clone for FilterStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            inner: Arc::clone(&self.inner),
            metrics: Arc::clone(&self.metrics),
            session: self.session.clone(),
        }
    }
}

impl<G: SearchGateway> FilterStore<G> {
    /// Create a store with empty state.
    pub fn new(gateway: G) -> Self {
        Self::with_gateway(Arc::new(gateway))
    }

    /// Create a store around a shared gateway.
    pub fn with_gateway(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            inner: Arc::new(Mutex::new(Inner::default())),
            metrics: Arc::new(SearchMetrics::new()),
            session: SessionId::generate(),
        }
    }

    /// Use a specific session id in log fields.
    pub fn with_session(mut self, session: SessionId) -> Self {
        self.session = session;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Mutations

    /// Replace the free-text query.
    pub fn set_query(&self, text: impl Into<String>) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.query = text.into();
        inner.reset_and_issue()
    }

    /// Replace or unset one scalar filter field.
    pub fn set_filter(&self, update: FilterUpdate) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.selection.apply(update);
        inner.reset_and_issue()
    }

    /// Add a value to a set field. Adding a present value changes nothing,
    /// but the page still resets and a search is still issued.
    pub fn add_to_set(&self, field: SetField, value: impl Into<String>) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.selection.insert(field, value);
        inner.reset_and_issue()
    }

    /// Remove a value from a set field; absent values are ignored.
    pub fn remove_from_set(&self, field: SetField, value: &str) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.selection.remove(field, value);
        inner.reset_and_issue()
    }

    /// Unset a scalar field or empty a set field.
    pub fn clear_field(&self, field: FilterField) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.selection.clear(field);
        inner.reset_and_issue()
    }

    /// Reset every filter. The query is kept.
    pub fn clear_all(&self) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.selection = FilterSelection::default();
        inner.reset_and_issue()
    }

    /// Jump to page `n`. Not validated: out-of-range pages (including 0) go
    /// to the search service unchanged.
    pub fn set_page(&self, n: u32) -> SearchCommand {
        let mut inner = self.lock();
        inner.state.page = n;
        inner.issue()
    }

    /// Re-issue the current search unchanged. Also used for a session's
    /// first search.
    pub fn retry(&self) -> SearchCommand {
        self.lock().issue()
    }

    // Request lifecycle

    /// Mark a command as dispatched. Returns `None` when a newer command has
    /// already been issued, in which case nothing should be sent.
    pub fn begin(&self, command: SearchCommand) -> Option<Dispatch> {
        let mut inner = self.lock();
        if command.generation != inner.state.generation {
            tracing::debug!(
                session = %self.session,
                generation = command.generation.value(),
                latest = inner.state.generation.value(),
                "skipping superseded search before dispatch"
            );
            return None;
        }

        inner.state.is_loading = true;
        inner.state.last_error = None;
        inner.dispatched = Some(command.generation);
        self.metrics.record_dispatched();
        tracing::debug!(
            session = %self.session,
            generation = command.generation.value(),
            query = %command.request.query,
            page = command.request.page,
            "search dispatched"
        );

        Some(Dispatch {
            generation: command.generation,
            request: command.request,
            started: Instant::now(),
        })
    }

    /// Apply a gateway result, unless a newer command has been issued since
    /// `dispatch` began.
    pub fn complete(
        &self,
        dispatch: &Dispatch,
        result: GatewayResult<SearchResult>,
    ) -> SearchOutcome {
        let mut inner = self.lock();
        let latest = inner.state.generation;
        let elapsed = dispatch.started.elapsed();

        if dispatch.generation != latest {
            // No newer search was sent, so nothing is in flight any more.
            if inner.dispatched == Some(dispatch.generation) {
                inner.state.is_loading = false;
            }
            tracing::debug!(
                session = %self.session,
                generation = dispatch.generation.value(),
                latest = latest.value(),
                ok = result.is_ok(),
                "discarding stale search response"
            );
            self.metrics.record_superseded();
            return SearchOutcome::Superseded;
        }

        inner.state.is_loading = false;
        match result {
            Ok(result) => {
                tracing::debug!(
                    session = %self.session,
                    generation = dispatch.generation.value(),
                    total_hits = result.total_hits,
                    hits = result.hits.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "search applied"
                );
                inner.state.results = result.hits;
                inner.state.total_hits = result.total_hits;
                if let Some(facets) = result.facet_distribution {
                    inner.state.facet_counts = facets;
                    inner.facets_from_search = true;
                }
                inner.state.last_error = None;
                self.metrics.record_applied(elapsed);
                SearchOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(
                    session = %self.session,
                    generation = dispatch.generation.value(),
                    transport = err.is_transport(),
                    error = %err,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "search failed"
                );
                inner.state.results = Vec::new();
                inner.state.total_hits = 0;
                inner.state.last_error = Some(SEARCH_FAILED_MESSAGE.to_string());
                self.metrics.record_failed();
                SearchOutcome::Failed
            }
        }
    }

    /// Dispatch a command through the gateway and apply its response.
    pub async fn execute(&self, command: SearchCommand) -> SearchOutcome {
        let Some(dispatch) = self.begin(command) else {
            return SearchOutcome::Superseded;
        };
        let params = &dispatch.request;
        let result = self
            .gateway
            .search(
                &params.query,
                &params.selection,
                params.page,
                params.page_size,
            )
            .await;
        self.complete(&dispatch, result)
    }

    /// Apply a mutation and execute the command it returns.
    pub async fn run<F>(&self, mutate: F) -> SearchOutcome
    where
        F: FnOnce(&Self) -> SearchCommand,
    {
        let command = mutate(self);
        self.execute(command).await
    }

    /// Seed facet counts before the first search.
    ///
    /// On failure the error is recorded in `last_error` and returned; counts
    /// stay as they were.
    pub async fn initialize(&self) -> Result<(), SearchError> {
        let result = self.gateway.fetch_facet_options().await;
        let mut inner = self.lock();
        match result {
            Ok(facets) => {
                if inner.facets_from_search {
                    tracing::debug!(session = %self.session, "facet seed arrived after a search; ignored");
                } else {
                    tracing::debug!(session = %self.session, fields = facets.len(), "facet options seeded");
                    inner.state.facet_counts = facets;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session = %self.session, error = %err, "failed to load facet options");
                inner.state.last_error = Some(FACETS_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    // Reads

    pub fn snapshot(&self) -> SearchSnapshot {
        self.lock().state.clone()
    }

    pub fn query(&self) -> String {
        self.lock().state.query.clone()
    }

    pub fn selection(&self) -> FilterSelection {
        self.lock().state.selection.clone()
    }

    pub fn page(&self) -> u32 {
        self.lock().state.page
    }

    pub fn results(&self) -> Vec<ProductSummary> {
        self.lock().state.results.clone()
    }

    pub fn total_hits(&self) -> u64 {
        self.lock().state.total_hits
    }

    pub fn facet_counts(&self) -> FacetDistribution {
        self.lock().state.facet_counts.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().state.last_error.clone()
    }

    pub fn generation(&self) -> Generation {
        self.lock().state.generation
    }

    /// Facet options for one field, labelled for display.
    pub fn facet_options_for(&self, field: &str) -> Vec<FacetOption> {
        self.lock().state.facet_options_for(field)
    }

    pub fn has_active_filters(&self) -> bool {
        self.lock().state.has_active_filters()
    }

    pub fn total_pages(&self) -> u64 {
        self.lock().state.total_pages()
    }

    pub fn pagination(&self) -> Pagination {
        self.lock().state.pagination()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
