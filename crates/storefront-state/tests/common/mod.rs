//! A gateway whose responses are released by the test.

#![allow(dead_code)]

use async_trait::async_trait;
use storefront_commerce::catalog::ProductSummary;
use storefront_commerce::search::{FacetDistribution, FilterSelection, SearchResult};
use storefront_search::{GatewayResult, SearchError, SearchGateway};
use tokio::sync::{mpsc, oneshot};

/// A search the store has sent, waiting for the test to answer it.
pub struct PendingSearch {
    pub query: String,
    pub selection: FilterSelection,
    pub page: u32,
    pub page_size: u32,
    respond: oneshot::Sender<GatewayResult<SearchResult>>,
}

impl PendingSearch {
    pub fn respond(self, result: GatewayResult<SearchResult>) {
        let _ = self.respond.send(result);
    }
}

pub struct ControlledGateway {
    searches: mpsc::UnboundedSender<PendingSearch>,
    facets: GatewayResult<FacetDistribution>,
}

impl ControlledGateway {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingSearch>) {
        Self::with_facets(Ok(FacetDistribution::new()))
    }

    pub fn with_facets(
        facets: GatewayResult<FacetDistribution>,
    ) -> (Self, mpsc::UnboundedReceiver<PendingSearch>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { searches: tx, facets }, rx)
    }
}

#[async_trait]
impl SearchGateway for ControlledGateway {
    async fn search(
        &self,
        query: &str,
        selection: &FilterSelection,
        page: u32,
        page_size: u32,
    ) -> GatewayResult<SearchResult> {
        let (respond, answer) = oneshot::channel();
        let pending = PendingSearch {
            query: query.to_string(),
            selection: selection.clone(),
            page,
            page_size,
            respond,
        };
        if self.searches.send(pending).is_err() {
            return Err(SearchError::Transport("test harness closed".to_string()));
        }
        answer
            .await
            .unwrap_or_else(|_| Err(SearchError::Transport("response dropped".to_string())))
    }

    async fn fetch_facet_options(&self) -> GatewayResult<FacetDistribution> {
        self.facets.clone()
    }
}

pub fn product(id: &str, title: &str) -> ProductSummary {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "handle": title.to_lowercase().replace(' ', "-"),
    }))
    .unwrap()
}

pub fn result_with(titles: &[&str], total_hits: u64) -> SearchResult {
    SearchResult {
        hits: titles
            .iter()
            .enumerate()
            .map(|(i, t)| product(&format!("prod_{}", i), t))
            .collect(),
        total_hits,
        facet_distribution: None,
    }
}
