//! Commerce backend client.
//!
//! Thin wrapper over the backend's `/store` REST API for the records the
//! search index does not carry: full products, collections and categories.
//!
//! ```rust,no_run
//! use storefront_backend::{CommerceClient, ProductListParams};
//! use storefront_core::CommerceBackendConfig;
//!
//! # async fn run() -> Result<(), storefront_backend::BackendError> {
//! let client = CommerceClient::new(&CommerceBackendConfig::default())?;
//! let page = client
//!     .list_products(&ProductListParams::new().query("boot").limit(10))
//!     .await?;
//! println!("{} of {}", page.products.len(), page.count);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod params;
mod responses;

pub use client::CommerceClient;
pub use error::BackendError;
pub use params::ProductListParams;
pub use responses::{CategoryListResponse, CollectionListResponse, ProductListResponse, ProductResponse};
