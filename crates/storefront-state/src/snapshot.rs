//! Read-only view of the store.

use serde::Serialize;
use storefront_commerce::catalog::ProductSummary;
use storefront_commerce::search::{
    FacetDistribution, FacetOption, FilterSelection, Pagination, PAGE_SIZE,
};

use crate::command::Generation;

/// An owned copy of the store's state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    pub selection: FilterSelection,
    /// 1-based; not validated against `total_pages`.
    pub page: u32,
    pub page_size: u32,
    pub results: Vec<ProductSummary>,
    pub total_hits: u64,
    pub facet_counts: FacetDistribution,
    pub is_loading: bool,
    pub last_error: Option<String>,
    /// Most recently issued generation.
    pub generation: Generation,
}

impl Default for SearchSnapshot {
    fn default() -> Self {
        Self {
            query: String::new(),
            selection: FilterSelection::default(),
            page: 1,
            page_size: PAGE_SIZE,
            results: Vec::new(),
            total_hits: 0,
            facet_counts: FacetDistribution::new(),
            is_loading: false,
            last_error: None,
            generation: Generation::default(),
        }
    }
}

impl SearchSnapshot {
    pub fn has_active_filters(&self) -> bool {
        self.selection.has_active_filters()
    }

    /// `ceil(total_hits / page_size)`.
    pub fn total_pages(&self) -> u64 {
        self.pagination().total_pages
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size, self.total_hits)
    }

    /// Options for one facet field, in the order the service reported them.
    pub fn facet_options_for(&self, field: &str) -> Vec<FacetOption> {
        FacetOption::for_field(&self.facet_counts, field)
    }
}
