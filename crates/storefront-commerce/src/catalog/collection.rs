//! Product collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::null_as_default;
use crate::ids::CollectionId;

/// A collection record from the commerce backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Unique collection identifier.
    pub id: CollectionId,
    /// Display title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// URL-friendly handle, used as the search facet value.
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// The collection reference embedded in search index documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_from_backend_json() {
        let json = r#"{
            "id": "pcol_summer",
            "title": "Summer",
            "handle": "summer",
            "created_at": "2024-05-01T10:00:00.000Z",
            "updated_at": null,
            "metadata": null
        }"#;
        let collection: Collection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.id.as_str(), "pcol_summer");
        assert_eq!(collection.handle, "summer");
        assert!(collection.created_at.is_some());
        assert!(collection.updated_at.is_none());
    }
}
