//! Product and variant types.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{null_as_default, Category, CategoryRef, Collection, CollectionRef};
use crate::ids::{CollectionId, ProductId, VariantId};
use crate::money::{Currency, Money};

/// A single price of a variant, in minor units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantPrice {
    pub amount: i64,
    /// Lowercase ISO code as sent by the backend (e.g. "usd").
    pub currency_code: String,
}

impl VariantPrice {
    pub fn money(&self) -> Money {
        Money::new(self.amount, Currency::new(&self.currency_code))
    }

    /// Format for display (e.g. "$19.99").
    pub fn display(&self) -> String {
        self.money().display()
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductVariant {
    pub id: VariantId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Vec<VariantPrice>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

/// A tag reference (`{"value": "new_arrival"}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// A product type reference (`{"value": "apparel"}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// A product document as stored in the search index.
///
/// Only the display fields are typed; anything else the index returns (for
/// example `_formatted` or `metadata`) is kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default, rename = "type")]
    pub product_type: Option<TypeRef>,
    #[serde(default)]
    pub collection: Option<CollectionRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<TagRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<CategoryRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductSummary {
    /// The lowest price across all variants.
    pub fn lowest_price(&self) -> Option<&VariantPrice> {
        self.variants
            .iter()
            .flat_map(|v| v.prices.iter())
            .min_by_key(|p| p.amount)
    }

    /// Description truncated to `max_chars`, with "..." appended when cut.
    pub fn excerpt(&self, max_chars: usize) -> Option<String> {
        let description = self.description.as_deref()?;
        if description.chars().count() <= max_chars {
            return Some(description.to_string());
        }
        let cut: String = description.chars().take(max_chars).collect();
        Some(format!("{}...", cut))
    }

    /// Creation time, when the index carries it.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }

    /// True when any variant reports positive inventory.
    pub fn in_stock(&self) -> bool {
        self.variants
            .iter()
            .any(|v| v.inventory_quantity.unwrap_or(0) > 0)
    }
}

/// A full product record from the commerce backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub collection_id: Option<CollectionId>,
    #[serde(default)]
    pub collection: Option<Collection>,
    #[serde(default, rename = "type")]
    pub product_type: Option<TypeRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<TagRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl Product {
    /// The lowest price across all variants.
    pub fn lowest_price(&self) -> Option<&VariantPrice> {
        self.variants
            .iter()
            .flat_map(|v| v.prices.iter())
            .min_by_key(|p| p.amount)
    }

    /// Find a variant by ID.
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// True when any variant reports positive inventory.
    pub fn in_stock(&self) -> bool {
        self.variants
            .iter()
            .any(|v| v.inventory_quantity.unwrap_or(0) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIT: &str = r#"{
        "id": "prod_01",
        "title": "Trail Boot",
        "description": "A sturdy boot for long walks.",
        "handle": "trail-boot",
        "created_at": 1714557600000,
        "collection": {"title": "Outdoor", "handle": "outdoor"},
        "tags": [{"value": "new_arrival"}],
        "categories": null,
        "variants": [
            {"id": "variant_1", "title": "42", "prices": [
                {"amount": 12900, "currency_code": "usd"},
                {"amount": 11900, "currency_code": "eur"}
            ]},
            {"id": "variant_2", "title": "43", "prices": [
                {"amount": 9900, "currency_code": "usd"}
            ], "inventory_quantity": 3}
        ],
        "_formatted": {"title": "<em>Trail</em> Boot"}
    }"#;

    #[test]
    fn test_summary_parses_index_document() {
        let hit: ProductSummary = serde_json::from_str(HIT).unwrap();
        assert_eq!(hit.id.as_str(), "prod_01");
        assert_eq!(hit.collection.as_ref().unwrap().handle, "outdoor");
        assert!(hit.categories.is_empty());
        assert_eq!(hit.variants.len(), 2);
        assert!(hit.extra.contains_key("_formatted"));
    }

    #[test]
    fn test_lowest_price_spans_variants() {
        let hit: ProductSummary = serde_json::from_str(HIT).unwrap();
        let lowest = hit.lowest_price().unwrap();
        assert_eq!(lowest.amount, 9900);
        assert_eq!(lowest.display(), "$99.00");
    }

    #[test]
    fn test_unknown_currency_display() {
        let price = VariantPrice {
            amount: 1250,
            currency_code: "xts".to_string(),
        };
        assert_eq!(price.display(), "12.50 XTS");
    }

    #[test]
    fn test_excerpt() {
        let hit: ProductSummary = serde_json::from_str(HIT).unwrap();
        assert_eq!(hit.excerpt(8).as_deref(), Some("A sturdy..."));
        assert_eq!(
            hit.excerpt(100).as_deref(),
            Some("A sturdy boot for long walks.")
        );
    }

    #[test]
    fn test_created_at_and_stock() {
        let hit: ProductSummary = serde_json::from_str(HIT).unwrap();
        assert_eq!(
            hit.created_at_utc().unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
        assert!(hit.in_stock());
    }

    #[test]
    fn test_backend_product() {
        let json = r#"{
            "id": "prod_01",
            "title": "Trail Boot",
            "handle": "trail-boot",
            "collection_id": "pcol_outdoor",
            "collection": null,
            "tags": null,
            "variants": [{"id": "variant_1", "title": "42", "prices": [
                {"amount": 12900, "currency_code": "usd"}]}],
            "created_at": "2024-05-01T10:00:00.000Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.collection_id.as_ref().unwrap().as_str(), "pcol_outdoor");
        assert!(product.tags.is_empty());
        assert!(product.variant(&VariantId::new("variant_1")).is_some());
        assert_eq!(product.lowest_price().unwrap().amount, 12900);
    }
}
