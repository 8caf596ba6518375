//! Storefront domain types.
//!
//! This crate holds the plain values shared by the gateways and the filter
//! state store:
//!
//! - **Catalog**: product summaries from the search index, full product,
//!   collection and category records from the commerce backend
//! - **Search**: the user's `FilterSelection`, sort options, the structured
//!   `SearchRequest` sent to the search index, results, facets and pagination
//! - **Money**: minor-unit prices and display formatting
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let mut selection = FilterSelection::default();
//! selection.insert(SetField::Categories, "shoes");
//! selection.apply(FilterUpdate::InStock(Some(true)));
//!
//! let request = SearchRequest::for_selection("boots", &selection, 2, PAGE_SIZE);
//! assert_eq!(request.offset, 20);
//! assert_eq!(
//!     request.filter.as_deref(),
//!     Some(r#"(categories.handle = "shoes") AND variants.inventory_quantity > 0"#)
//! );
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod ordered;

pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use ordered::OrderedMap;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::ordered::OrderedMap;

    // Catalog
    pub use crate::catalog::{
        Category, Collection, Product, ProductSummary, ProductVariant, VariantPrice,
    };

    // Search
    pub use crate::search::{
        FacetCounts, FacetDistribution, FacetOption, FilterField, FilterSelection, FilterUpdate,
        Pagination, PriceRange, SearchRequest, SearchResult, SetField, SortDirective, SortOption,
        PAGE_SIZE,
    };
}
