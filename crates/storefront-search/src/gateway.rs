//! The gateway trait.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_commerce::search::{FacetDistribution, FilterSelection, SearchResult};

use crate::error::GatewayResult;

/// Search index backend.
///
/// One call is one request to the service. Implementations never retry and
/// never return partial results.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Search one page of products matching `query` and `selection`.
    async fn search(
        &self,
        query: &str,
        selection: &FilterSelection,
        page: u32,
        page_size: u32,
    ) -> GatewayResult<SearchResult>;

    /// Facet counts over the whole index, without hits.
    async fn fetch_facet_options(&self) -> GatewayResult<FacetDistribution>;
}

#[async_trait]
impl<G: SearchGateway + ?Sized> SearchGateway for Arc<G> {
    async fn search(
        &self,
        query: &str,
        selection: &FilterSelection,
        page: u32,
        page_size: u32,
    ) -> GatewayResult<SearchResult> {
        (**self).search(query, selection, page, page_size).await
    }

    async fn fetch_facet_options(&self) -> GatewayResult<FacetDistribution> {
        (**self).fetch_facet_options().await
    }
}
