//! Meilisearch implementation of the gateway.

use std::time::Instant;

use async_trait::async_trait;
use storefront_commerce::search::{
    FacetDistribution, FilterSelection, SearchRequest, SearchResult,
};
use storefront_core::SearchServiceConfig;
use storefront_data::{DependencyTag, FetchClient, RequestBuilder, TimeoutConfig};
use url::Url;

use crate::error::{GatewayResult, SearchError};
use crate::gateway::SearchGateway;
use crate::wire::{normalize, IndexSearchResponse};

/// Gateway to one Meilisearch index.
#[derive(Debug, Clone)]
pub struct MeiliSearchGateway {
    client: FetchClient,
    search_url: Url,
    index: String,
    api_key: Option<String>,
}

impl MeiliSearchGateway {
    /// Build a gateway from the search service settings.
    pub fn new(config: &SearchServiceConfig) -> GatewayResult<Self> {
        let client = FetchClient::with_timeout(
            DependencyTag::Search,
            TimeoutConfig::from_millis(config.timeout_ms),
        )
        .map_err(|e| SearchError::Config(e.to_string()))?;

        Ok(Self {
            client,
            search_url: search_url(&config.host, &config.index)?,
            index: config.index.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Name of the index this gateway queries.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Prepare the HTTP request for a search body without sending it.
    pub fn build_request(&self, body: &SearchRequest) -> GatewayResult<RequestBuilder> {
        let mut request = self
            .client
            .post(self.search_url.as_str())
            .json(body)?;
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        Ok(request.build())
    }

    async fn execute(&self, body: &SearchRequest) -> GatewayResult<SearchResult> {
        let started = Instant::now();
        let request = self.build_request(body)?;

        let response = self
            .client
            .execute(request)
            .await
            .and_then(|r| r.error_for_status());
        let response = match response {
            Ok(r) => r,
            Err(e) => {
                let err = SearchError::from(e);
                tracing::warn!(
                    index = %self.index,
                    query = %body.q,
                    transport = err.is_transport(),
                    error = %err,
                    "search request failed"
                );
                return Err(err);
            }
        };

        let parsed = IndexSearchResponse::from_slice(&response.body)?;
        tracing::debug!(
            index = %self.index,
            query = %body.q,
            offset = body.offset,
            limit = body.limit,
            hits = parsed.hits.len(),
            estimated_total_hits = parsed.estimated_total_hits,
            processing_time_ms = parsed.processing_time_ms,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search completed"
        );
        Ok(normalize(parsed))
    }
}

/// `{host}/indexes/{index}/search`, with the index name percent-encoded as one
/// path segment.
fn search_url(host: &str, index: &str) -> GatewayResult<Url> {
    let invalid = |reason: String| SearchError::Config(format!("search host {}: {}", host, reason));
    let mut url = Url::parse(host).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["indexes", index, "search"]);
    Ok(url)
}

#[async_trait]
impl SearchGateway for MeiliSearchGateway {
    async fn search(
        &self,
        query: &str,
        selection: &FilterSelection,
        page: u32,
        page_size: u32,
    ) -> GatewayResult<SearchResult> {
        let body = SearchRequest::for_selection(query, selection, page, page_size);
        self.execute(&body).await
    }

    async fn fetch_facet_options(&self) -> GatewayResult<FacetDistribution> {
        let result = self.execute(&SearchRequest::facets_only()).await?;
        Ok(result.facet_distribution.unwrap_or_default())
    }
}
