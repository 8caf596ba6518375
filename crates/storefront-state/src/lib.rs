//! Filter and search state for a product listing.
//!
//! [`FilterStore`] is the single holder of the shopper's query, filter
//! selection and page. Mutations never touch the network: each returns a
//! [`SearchCommand`] tagged with a fresh [`Generation`], and the caller runs
//! it with [`FilterStore::execute`]. Only the response to the most recently
//! issued command may write the visible state; anything older is discarded
//! when it arrives.
//!
//! ```rust,no_run
//! use storefront_commerce::search::SetField;
//! use storefront_core::SearchServiceConfig;
//! use storefront_search::MeiliSearchGateway;
//! use storefront_state::FilterStore;
//!
//! # async fn run() -> Result<(), storefront_search::SearchError> {
//! let gateway = MeiliSearchGateway::new(&SearchServiceConfig::default())?;
//! let store = FilterStore::new(gateway);
//!
//! let _ = store.initialize().await;
//! store.execute(store.add_to_set(SetField::Tags, "sale")).await;
//!
//! let snapshot = store.snapshot();
//! println!("{} products", snapshot.total_hits);
//! # Ok(())
//! # }
//! ```

mod command;
mod snapshot;
mod store;

pub use command::{Dispatch, Generation, SearchCommand, SearchOutcome, SearchParams};
pub use snapshot::SearchSnapshot;
pub use store::{FilterStore, FACETS_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
