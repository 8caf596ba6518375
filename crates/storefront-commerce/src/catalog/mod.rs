//! Product catalog module.
//!
//! Two shapes of product data flow through the storefront: the flattened
//! `ProductSummary` documents stored in the search index, and the full
//! `Product`, `Collection` and `Category` records served by the commerce
//! backend.

mod category;
mod collection;
mod product;

pub use category::{Category, CategoryRef};
pub use collection::{Collection, CollectionRef};
pub use product::{Product, ProductSummary, ProductVariant, TagRef, TypeRef, VariantPrice};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (backend payloads send `null`
/// for empty relations).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
