//! Search gateway.
//!
//! [`SearchGateway`] is the seam between the filter store and the hosted
//! search index. [`MeiliSearchGateway`] talks to a Meilisearch instance;
//! tests substitute their own implementation.

mod error;
mod gateway;
mod meili;
mod wire;

pub use error::{GatewayResult, SearchError};
pub use gateway::SearchGateway;
pub use meili::MeiliSearchGateway;
pub use wire::{normalize, IndexSearchResponse};
