//! Search request construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::search::FilterSelection;

/// Results per page.
pub const PAGE_SIZE: u32 = 20;

/// Facets aggregated alongside every search.
pub const SEARCH_FACETS: [&str; 4] = [
    "categories.handle",
    "collection.handle",
    "tags.value",
    "variants.prices.currency_code",
];

/// Facets requested by the facet-only seed query.
pub const SEED_FACETS: [&str; 6] = [
    "categories.handle",
    "categories.name",
    "collection.handle",
    "collection.title",
    "tags.value",
    "type.value",
];

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Newest first.
    #[default]
    CreatedAt,
    /// Most recently updated first.
    UpdatedAt,
    /// Title A-Z.
    Title,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::CreatedAt,
        SortOption::UpdatedAt,
        SortOption::Title,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::CreatedAt => "created_at",
            SortOption::UpdatedAt => "updated_at",
            SortOption::Title => "title",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::CreatedAt => "Newest First",
            SortOption::UpdatedAt => "Recently Updated",
            SortOption::Title => "Name (A-Z)",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }

    /// The single sort directive sent to the search index.
    pub fn to_sort_directive(&self) -> SortDirective {
        match self {
            SortOption::CreatedAt => SortDirective::desc("created_at"),
            SortOption::UpdatedAt => SortDirective::desc("updated_at"),
            SortOption::Title => SortDirective::asc("title"),
            SortOption::PriceAsc => SortDirective::asc("variants.prices.amount"),
            SortOption::PriceDesc => SortDirective::desc("variants.prices.amount"),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| CommerceError::UnknownSortOption(s.to_string()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One `<field>:<asc|desc>` sort entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortDirective {
    pub field: &'static str,
    pub order: SortOrder,
}

impl SortDirective {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            order: SortOrder::Desc,
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.order.as_str())
    }
}

/// A structured query against the product search index.
///
/// Serializes to the index's search body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Free-text query.
    pub q: String,
    /// Boolean filter expression; absent means no filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// At most one `<field>:<order>` entry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    /// Facets to aggregate over the whole matching set.
    pub facets: Vec<String>,
    pub limit: u32,
    /// Zero-based offset. Signed so an out-of-range page reaches the service
    /// unchanged.
    pub offset: i64,
}

impl SearchRequest {
    /// Build the request for a page of results.
    pub fn for_selection(
        query: impl Into<String>,
        selection: &FilterSelection,
        page: u32,
        page_size: u32,
    ) -> Self {
        Self {
            q: query.into(),
            filter: selection.to_filter_expression(),
            sort: vec![selection.sort().to_sort_directive().to_string()],
            facets: SEARCH_FACETS.iter().map(|f| f.to_string()).collect(),
            limit: page_size,
            offset: (i64::from(page) - 1) * i64::from(page_size),
        }
    }

    /// Build the zero-limit request that only aggregates facets.
    pub fn facets_only() -> Self {
        Self {
            q: String::new(),
            filter: None,
            sort: Vec::new(),
            facets: SEED_FACETS.iter().map(|f| f.to_string()).collect(),
            limit: 0,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FilterUpdate, SetField};

    #[test]
    fn test_sort_directives() {
        let rendered: Vec<String> = SortOption::ALL
            .iter()
            .map(|o| o.to_sort_directive().to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "created_at:desc",
                "updated_at:desc",
                "title:asc",
                "variants.prices.amount:asc",
                "variants.prices.amount:desc",
            ]
        );
    }

    #[test]
    fn test_parse_sort_option() {
        assert_eq!("price_desc".parse::<SortOption>().unwrap(), SortOption::PriceDesc);
        assert!("relevance".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_default_request() {
        let request = SearchRequest::for_selection("", &FilterSelection::default(), 1, PAGE_SIZE);
        assert_eq!(request.q, "");
        assert_eq!(request.filter, None);
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, 20);
        assert_eq!(request.sort, vec!["created_at:desc".to_string()]);
        assert_eq!(request.facets.len(), SEARCH_FACETS.len());
    }

    #[test]
    fn test_offset_follows_page() {
        let mut selection = FilterSelection::default();
        selection.insert(SetField::Tags, "sale");
        selection.apply(FilterUpdate::SortBy(Some(SortOption::Title)));

        let request = SearchRequest::for_selection("boot", &selection, 3, PAGE_SIZE);
        assert_eq!(request.offset, 40);
        assert_eq!(request.sort, vec!["title:asc".to_string()]);
        assert_eq!(request.filter.as_deref(), Some(r#"(tags.value = "sale")"#));
    }

    #[test]
    fn test_page_zero_is_not_clamped() {
        let request = SearchRequest::for_selection("", &FilterSelection::default(), 0, PAGE_SIZE);
        assert_eq!(request.offset, -20);
    }

    #[test]
    fn test_request_body_json() {
        let body = serde_json::to_value(SearchRequest::facets_only()).unwrap();
        assert_eq!(body["limit"], 0);
        assert!(body.get("filter").is_none());
        assert!(body.get("sort").is_none());
        assert_eq!(body["facets"][5], "type.value");
    }
}
