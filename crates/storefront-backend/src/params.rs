//! Query parameters for product listing.

use storefront_commerce::{CategoryId, CollectionId};

/// Filters for `GET /store/products`.
///
/// Unset scalars are omitted; list parameters repeat the key once per value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListParams {
    pub q: Option<String>,
    pub collection_id: Vec<CollectionId>,
    pub category_id: Vec<CategoryId>,
    pub tags: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Sort field, `-` prefixed for descending (`-created_at`).
    pub order: Option<String>,
    /// Comma-separated relations to expand (`variants,collection`).
    pub expand: Option<String>,
}

impl ProductListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn collection(mut self, id: impl Into<CollectionId>) -> Self {
        self.collection_id.push(id.into());
        self
    }

    pub fn category(mut self, id: impl Into<CategoryId>) -> Self {
        self.category_id.push(id.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn expand(mut self, relations: impl Into<String>) -> Self {
        self.expand = Some(relations.into());
        self
    }

    /// Flatten into query-string pairs in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: String| pairs.push((key.to_string(), value));

        if let Some(q) = &self.q {
            push("q", q.clone());
        }
        for id in &self.collection_id {
            push("collection_id", id.to_string());
        }
        for id in &self.category_id {
            push("category_id", id.to_string());
        }
        for tag in &self.tags {
            push("tags", tag.clone());
        }
        if let Some(limit) = self.limit {
            push("limit", limit.to_string());
        }
        if let Some(offset) = self.offset {
            push("offset", offset.to_string());
        }
        if let Some(order) = &self.order {
            push("order", order.clone());
        }
        if let Some(expand) = &self.expand {
            push("expand", expand.clone());
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_produce_no_pairs() {
        assert!(ProductListParams::new().to_query_pairs().is_empty());
    }

    #[test]
    fn test_arrays_repeat_the_key() {
        let params = ProductListParams::new()
            .query("boot")
            .category("pcat_shoes")
            .category("pcat_bags")
            .limit(12)
            .offset(0);

        let owned = params.to_query_pairs();
        let pairs: Vec<(&str, &str)> = owned
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q", "boot"),
                ("category_id", "pcat_shoes"),
                ("category_id", "pcat_bags"),
                ("limit", "12"),
                ("offset", "0"),
            ]
        );
    }
}
