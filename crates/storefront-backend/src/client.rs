//! The store API client.

use std::time::Instant;

use serde::de::DeserializeOwned;
use storefront_commerce::catalog::Product;
use storefront_commerce::ProductId;
use storefront_core::CommerceBackendConfig;
use storefront_data::{DependencyTag, FetchClient, RequestBuilder, TimeoutConfig};
use url::Url;

use crate::error::BackendError;
use crate::params::ProductListParams;
use crate::responses::{
    CategoryListResponse, CollectionListResponse, ProductListResponse, ProductResponse,
};

/// Client for the commerce backend's `/store` endpoints.
///
/// Every non-2xx answer is an error. Nothing is retried.
#[derive(Debug, Clone)]
pub struct CommerceClient {
    client: FetchClient,
    base_url: Url,
}

impl CommerceClient {
    pub fn new(config: &CommerceBackendConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.base_url.clone()));
        }
        let client = FetchClient::with_timeout(
            DependencyTag::Catalog,
            TimeoutConfig::from_millis(config.timeout_ms),
        )
        .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Prepare `GET /store/products` without sending it.
    pub fn products_request(
        &self,
        params: &ProductListParams,
    ) -> Result<RequestBuilder, BackendError> {
        let url = self.endpoint(&["store", "products"])?;
        Ok(self
            .client
            .get(url.as_str())
            .query_pairs(params.to_query_pairs())
            .build())
    }

    /// Prepare `GET /store/products/{id}` without sending it.
    pub fn product_request(&self, id: &ProductId) -> Result<RequestBuilder, BackendError> {
        let url = self.endpoint(&["store", "products", id.as_str()])?;
        Ok(self.client.get(url.as_str()).build())
    }

    pub async fn list_products(
        &self,
        params: &ProductListParams,
    ) -> Result<ProductListResponse, BackendError> {
        let request = self.products_request(params)?;
        self.fetch("products", request).await
    }

    pub async fn retrieve_product(&self, id: &ProductId) -> Result<Product, BackendError> {
        let request = self.product_request(id)?;
        let response: ProductResponse = self.fetch("product", request).await?;
        Ok(response.product)
    }

    pub async fn list_collections(&self) -> Result<CollectionListResponse, BackendError> {
        let url = self.endpoint(&["store", "collections"])?;
        let request = self.client.get(url.as_str()).build();
        self.fetch("collections", request).await
    }

    pub async fn list_categories(&self) -> Result<CategoryListResponse, BackendError> {
        let url = self.endpoint(&["store", "product-categories"])?;
        let request = self.client.get(url.as_str()).build();
        self.fetch("categories", request).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let started = Instant::now();
        let result = self
            .client
            .execute(request)
            .await
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<T>());

        match result {
            Ok(value) => {
                tracing::debug!(
                    resource,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "backend fetch completed"
                );
                Ok(value)
            }
            Err(e) => {
                let err = BackendError::from_fetch(resource, e);
                tracing::warn!(resource, status = err.status(), error = %err, "backend fetch failed");
                Err(err)
            }
        }
    }
}
