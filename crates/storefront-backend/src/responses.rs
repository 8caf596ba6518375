//! Response envelopes of the store API.

use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::{Category, Collection, Product};

/// `GET /store/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

/// `GET /store/products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

/// `GET /store/collections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

/// `GET /store/product-categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub product_categories: Vec<Category>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}
