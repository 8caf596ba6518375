//! Commerce error types.

use thiserror::Error;

/// Errors raised while interpreting storefront domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Unknown sort key.
    #[error("Unknown sort option: {0}")]
    UnknownSortOption(String),

    /// Unknown filter field name.
    #[error("Unknown filter field: {0}")]
    UnknownFilterField(String),

    /// Filter field that does not hold a set of identifiers.
    #[error("Not a set filter field: {0}")]
    NotASetField(String),

    /// Unparseable price range literal.
    #[error("Invalid price range: {0}")]
    InvalidPriceRange(String),
}
