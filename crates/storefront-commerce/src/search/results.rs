//! Search results and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductSummary;
use crate::ordered::OrderedMap;

/// Facet value → number of matching records, in service order.
pub type FacetCounts = OrderedMap<u64>;

/// Facet field name → counts for that field.
pub type FacetDistribution = OrderedMap<FacetCounts>;

/// Normalized search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The page of hits, in ranking order.
    pub hits: Vec<ProductSummary>,
    /// Estimated size of the whole matching set.
    pub total_hits: u64,
    /// Counts over the whole matching set, when the service returned them.
    pub facet_distribution: Option<FacetDistribution>,
}

impl SearchResult {
    /// Create empty results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of hits in this page.
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages; zero when there are no items.
    pub total_pages: u64,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(u64::from(per_page))
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u64> {
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = (max_visible / 2) as u64;
        let start = u64::from(self.page).saturating_sub(half).max(1);
        let end = (start + max_visible as u64 - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible as u64).max(1);

        (start..=end).collect()
    }

    /// Whether pagination controls are worth showing.
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.per_page)).min(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 20, 45);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert!(p.is_paginated());
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.is_paginated());
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let last = Pagination::new(10, 10, 100);
        assert_eq!(last.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(3, 20, 45);
        assert_eq!(p.start_item(), 41);
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_empty_result() {
        let result = SearchResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.total_hits, 0);
        assert!(result.facet_distribution.is_none());
    }
}
