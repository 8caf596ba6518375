//! Search module.
//!
//! Contains the user's filter selection, its translation into the search
//! index's filter/sort syntax, and the normalized result shape.

mod facet;
mod filter;
mod query;
mod results;

pub use facet::{facet_label, FacetOption};
pub use filter::{FilterField, FilterSelection, FilterUpdate, PriceRange, SetField};
pub use query::{
    SearchRequest, SortDirective, SortOption, SortOrder, PAGE_SIZE, SEARCH_FACETS, SEED_FACETS,
};
pub use results::{FacetCounts, FacetDistribution, Pagination, SearchResult};
