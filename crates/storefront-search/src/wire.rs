//! Search service response body.

use serde::Deserialize;
use storefront_commerce::catalog::ProductSummary;
use storefront_commerce::search::{FacetDistribution, SearchResult};

use crate::error::SearchError;

/// The subset of a Meilisearch search response the storefront reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSearchResponse {
    #[serde(default)]
    pub hits: Vec<ProductSummary>,
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
    #[serde(default)]
    pub facet_distribution: Option<FacetDistribution>,
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
}

impl IndexSearchResponse {
    /// Parse a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, SearchError> {
        serde_json::from_slice(body).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

/// Map a service response onto the normalized result shape.
pub fn normalize(response: IndexSearchResponse) -> SearchResult {
    SearchResult {
        hits: response.hits,
        total_hits: response.estimated_total_hits.unwrap_or(0),
        facet_distribution: response.facet_distribution,
    }
}
