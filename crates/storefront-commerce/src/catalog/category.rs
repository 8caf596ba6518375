//! Category types for product organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::null_as_default;
use crate::ids::CategoryId;

/// A product category in the backend's category tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// URL-friendly handle, used as the search facet value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
    /// Category description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parent category ID (None for root categories).
    #[serde(default)]
    pub parent_category_id: Option<CategoryId>,
    /// Sort position within the parent.
    #[serde(default)]
    pub rank: Option<i64>,
    /// Direct children, when the backend expands them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_children: Vec<Category>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Check if this is a root category.
    pub fn is_root(&self) -> bool {
        self.parent_category_id.is_none()
    }

    /// Depth-first walk over this category and all expanded descendants,
    /// yielding each with its depth (0 for `self`).
    pub fn walk(&self) -> Vec<(usize, &Category)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((depth, category)) = stack.pop() {
            out.push((depth, category));
            for child in category.category_children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}

/// The category reference embedded in search index documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
}
