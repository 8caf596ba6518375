//! Backend record identifiers.
//!
//! Commerce backend records are keyed by opaque strings with a per-kind
//! prefix (`prod_01H...`, `pcol_...`). Each kind gets its own newtype so a
//! collection id cannot be passed where a product id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix the backend gives ids of this kind.
            pub const PREFIX: &'static str = $prefix;

            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the id carries the backend's prefix for this kind.
            /// Ids are never rejected for lacking it.
            pub fn has_expected_prefix(&self) -> bool {
                self.0.len() > Self::PREFIX.len() && self.0.starts_with(Self::PREFIX)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(
    /// Product id (`prod_...`).
    ProductId,
    "prod_"
);
define_id!(
    /// Variant id (`variant_...`).
    VariantId,
    "variant_"
);
define_id!(
    /// Collection id (`pcol_...`).
    CollectionId,
    "pcol_"
);
define_id!(
    /// Product category id (`pcat_...`).
    CategoryId,
    "pcat_"
);
