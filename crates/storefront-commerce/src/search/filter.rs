//! Filter selection and filter-expression construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::search::SortOption;

/// Filter fields that hold a set of independently toggleable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
    Categories,
    Collections,
    Tags,
}

impl SetField {
    pub const ALL: [SetField; 3] = [SetField::Categories, SetField::Collections, SetField::Tags];

    pub fn as_str(&self) -> &'static str {
        match self {
            SetField::Categories => "categories",
            SetField::Collections => "collections",
            SetField::Tags => "tags",
        }
    }

    /// Index attribute the field's values are matched against.
    pub fn attribute(&self) -> &'static str {
        match self {
            SetField::Categories => "categories.handle",
            SetField::Collections => "collection.handle",
            SetField::Tags => "tags.value",
        }
    }
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetField {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match FilterField::from_str(s)? {
            FilterField::Categories => Ok(SetField::Categories),
            FilterField::Collections => Ok(SetField::Collections),
            FilterField::Tags => Ok(SetField::Tags),
            _ => Err(CommerceError::NotASetField(s.to_string())),
        }
    }
}

/// Every field of a `FilterSelection` that can be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Categories,
    Collections,
    Tags,
    PriceRange,
    InStock,
    SortBy,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Categories => "categories",
            FilterField::Collections => "collections",
            FilterField::Tags => "tags",
            FilterField::PriceRange => "price_range",
            FilterField::InStock => "in_stock",
            FilterField::SortBy => "sort_by",
        }
    }
}

impl From<SetField> for FilterField {
    fn from(field: SetField) -> Self {
        match field {
            SetField::Categories => FilterField::Categories,
            SetField::Collections => FilterField::Collections,
            SetField::Tags => FilterField::Tags,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" | "category" => Ok(FilterField::Categories),
            "collections" | "collection" => Ok(FilterField::Collections),
            "tags" | "tag" => Ok(FilterField::Tags),
            "price_range" | "priceRange" | "price" => Ok(FilterField::PriceRange),
            "in_stock" | "inStock" => Ok(FilterField::InStock),
            "sort_by" | "sortBy" | "sort" => Ok(FilterField::SortBy),
            _ => Err(CommerceError::UnknownFilterField(s.to_string())),
        }
    }
}

/// Price bounds in currency minor units.
///
/// `min <= max` is not enforced; an inverted range is passed through to the
/// search service as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

impl PriceRange {
    /// Create a range with both bounds.
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Only a lower bound.
    pub fn at_least(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Only an upper bound.
    pub fn at_most(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

/// Parses `min..max`, `min..` or `..max`.
impl FromStr for PriceRange {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommerceError::InvalidPriceRange(s.to_string());
        let (min, max) = s.trim().split_once("..").ok_or_else(invalid)?;
        let bound = |part: &str| -> Result<Option<u64>, CommerceError> {
            let part = part.trim();
            if part.is_empty() {
                Ok(None)
            } else {
                part.parse().map(Some).map_err(|_| invalid())
            }
        };
        let range = PriceRange {
            min: bound(min)?,
            max: bound(max)?,
        };
        if range.min.is_none() && range.max.is_none() {
            return Err(invalid());
        }
        Ok(range)
    }
}

/// A replacement for one scalar field. `None` clears the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterUpdate {
    PriceRange(Option<PriceRange>),
    InStock(Option<bool>),
    SortBy(Option<SortOption>),
}

impl FilterUpdate {
    /// The field this update writes.
    pub fn field(&self) -> FilterField {
        match self {
            FilterUpdate::PriceRange(_) => FilterField::PriceRange,
            FilterUpdate::InStock(_) => FilterField::InStock,
            FilterUpdate::SortBy(_) => FilterField::SortBy,
        }
    }
}

/// The user's current filter intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    /// `None` means no constraint, which is distinct from `Some(false)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortOption>,
}

impl FilterSelection {
    /// Values currently selected for a set field.
    pub fn values(&self, field: SetField) -> &[String] {
        match field {
            SetField::Categories => &self.categories,
            SetField::Collections => &self.collections,
            SetField::Tags => &self.tags,
        }
    }

    fn values_mut(&mut self, field: SetField) -> &mut Vec<String> {
        match field {
            SetField::Categories => &mut self.categories,
            SetField::Collections => &mut self.collections,
            SetField::Tags => &mut self.tags,
        }
    }

    /// Check whether a value is selected.
    pub fn contains(&self, field: SetField, value: &str) -> bool {
        self.values(field).iter().any(|v| v == value)
    }

    /// Add a value to a set field. Returns false if it was already present.
    pub fn insert(&mut self, field: SetField, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.values_mut(field);
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Remove a value from a set field. Returns false if it was absent.
    pub fn remove(&mut self, field: SetField, value: &str) -> bool {
        let values = self.values_mut(field);
        let before = values.len();
        values.retain(|v| v != value);
        values.len() != before
    }

    /// Replace a scalar field.
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::PriceRange(range) => self.price_range = range,
            FilterUpdate::InStock(in_stock) => self.in_stock = in_stock,
            FilterUpdate::SortBy(sort) => self.sort_by = sort,
        }
    }

    /// Remove a field entirely: scalars become unset, sets become empty.
    pub fn clear(&mut self, field: FilterField) {
        match field {
            FilterField::Categories => self.categories.clear(),
            FilterField::Collections => self.collections.clear(),
            FilterField::Tags => self.tags.clear(),
            FilterField::PriceRange => self.price_range = None,
            FilterField::InStock => self.in_stock = None,
            FilterField::SortBy => self.sort_by = None,
        }
    }

    /// Effective sort option.
    pub fn sort(&self) -> SortOption {
        self.sort_by.unwrap_or_default()
    }

    /// Whether any constraint narrows the result set. Sorting is not a
    /// constraint.
    pub fn has_active_filters(&self) -> bool {
        SetField::ALL.iter().any(|f| !self.values(*f).is_empty())
            || self.price_range.is_some()
            || self.in_stock.is_some()
    }

    /// Build the search index filter expression.
    ///
    /// Each non-empty set field contributes a parenthesized `OR` of equality
    /// tests; price bounds contribute range comparisons; `in_stock == Some(true)`
    /// contributes a positive inventory test. Clauses are joined with `AND`.
    /// Returns `None` when nothing constrains the search.
    pub fn to_filter_expression(&self) -> Option<String> {
        let mut clauses = Vec::new();

        for field in SetField::ALL {
            let values = self.values(field);
            if values.is_empty() {
                continue;
            }
            let alternatives = values
                .iter()
                .map(|v| format!("{} = {}", field.attribute(), quote(v)))
                .collect::<Vec<_>>()
                .join(" OR ");
            clauses.push(format!("({})", alternatives));
        }

        if let Some(range) = &self.price_range {
            if let Some(min) = range.min {
                clauses.push(format!("variants.prices.amount >= {}", min));
            }
            if let Some(max) = range.max {
                clauses.push(format!("variants.prices.amount <= {}", max));
            }
        }

        if self.in_stock == Some(true) {
            clauses.push("variants.inventory_quantity > 0".to_string());
        }

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" AND "))
        }
    }
}

/// Double-quote a filter value, escaping `\` and `"`.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_has_no_expression() {
        assert_eq!(FilterSelection::default().to_filter_expression(), None);
    }

    #[test]
    fn test_full_expression() {
        let mut selection = FilterSelection::default();
        selection.insert(SetField::Categories, "shoes");
        selection.insert(SetField::Categories, "bags");
        selection.apply(FilterUpdate::PriceRange(Some(PriceRange::new(1000, 5000))));
        selection.apply(FilterUpdate::InStock(Some(true)));

        assert_eq!(
            selection.to_filter_expression().unwrap(),
            r#"(categories.handle = "shoes" OR categories.handle = "bags") AND variants.prices.amount >= 1000 AND variants.prices.amount <= 5000 AND variants.inventory_quantity > 0"#
        );
    }

    #[test]
    fn test_each_set_field_uses_its_attribute() {
        let mut selection = FilterSelection::default();
        selection.insert(SetField::Collections, "summer");
        selection.insert(SetField::Tags, "sale");
        assert_eq!(
            selection.to_filter_expression().unwrap(),
            r#"(collection.handle = "summer") AND (tags.value = "sale")"#
        );
    }

    #[test]
    fn test_in_stock_false_adds_no_clause() {
        let mut selection = FilterSelection::default();
        selection.apply(FilterUpdate::InStock(Some(false)));
        assert_eq!(selection.to_filter_expression(), None);
        assert!(selection.has_active_filters());
    }

    #[test]
    fn test_inverted_and_half_open_ranges_pass_through() {
        let mut selection = FilterSelection::default();
        selection.apply(FilterUpdate::PriceRange(Some(PriceRange::new(5000, 1000))));
        assert_eq!(
            selection.to_filter_expression().unwrap(),
            "variants.prices.amount >= 5000 AND variants.prices.amount <= 1000"
        );

        selection.apply(FilterUpdate::PriceRange(Some(PriceRange::at_most(300))));
        assert_eq!(
            selection.to_filter_expression().unwrap(),
            "variants.prices.amount <= 300"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let mut selection = FilterSelection::default();
        selection.insert(SetField::Tags, r#"12" vinyl\b"#);
        assert_eq!(
            selection.to_filter_expression().unwrap(),
            r#"(tags.value = "12\" vinyl\\b")"#
        );
    }

    #[test]
    fn test_insert_and_remove_are_idempotent() {
        let mut selection = FilterSelection::default();
        assert!(selection.insert(SetField::Tags, "a"));
        assert!(!selection.insert(SetField::Tags, "a"));
        assert!(selection.insert(SetField::Tags, "b"));
        assert!(!selection.remove(SetField::Tags, "zzz"));
        assert!(selection.remove(SetField::Tags, "a"));
        assert!(!selection.remove(SetField::Tags, "a"));
        assert_eq!(selection.values(SetField::Tags).to_vec(), vec!["b".to_string()]);
    }

    /// Every add/remove sequence of up to `max_len` steps over `values`,
    /// as `(is_add, value)` pairs.
    fn set_op_sequences<'a>(values: &[&'a str], max_len: u32) -> Vec<Vec<(bool, &'a str)>> {
        let ops: Vec<(bool, &str)> = values
            .iter()
            .flat_map(|v| [(true, *v), (false, *v)])
            .collect();
        let mut sequences = Vec::new();
        for len in 0..=max_len {
            for mut n in 0..ops.len().pow(len) {
                let mut sequence = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    sequence.push(ops[n % ops.len()]);
                    n /= ops.len();
                }
                sequences.push(sequence);
            }
        }
        sequences
    }

    #[test]
    fn test_set_fields_match_set_model_for_all_short_sequences() {
        use std::collections::BTreeSet;

        let sequences = set_op_sequences(&["a", "b", "c"], 4);
        assert_eq!(sequences.len(), 1 + 6 + 36 + 216 + 1296);

        for field in SetField::ALL {
            for sequence in &sequences {
                let mut selection = FilterSelection::default();
                let mut model = BTreeSet::new();
                for &(is_add, value) in sequence {
                    let changed = if is_add {
                        selection.insert(field, value)
                    } else {
                        selection.remove(field, value)
                    };
                    let model_changed = if is_add {
                        model.insert(value)
                    } else {
                        model.remove(value)
                    };
                    assert_eq!(changed, model_changed, "{:?} {:?}", field, sequence);
                }

                let values = selection.values(field);
                let as_set: BTreeSet<&str> = values.iter().map(String::as_str).collect();
                assert_eq!(values.len(), as_set.len(), "duplicates after {:?}", sequence);
                assert_eq!(as_set, model, "{:?} {:?}", field, sequence);
                for other in SetField::ALL.into_iter().filter(|f| *f != field) {
                    assert!(selection.values(other).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_clear_field() {
        let mut selection = FilterSelection::default();
        selection.insert(SetField::Categories, "shoes");
        selection.apply(FilterUpdate::SortBy(Some(SortOption::Title)));
        selection.clear(FilterField::Categories);
        selection.clear(FilterField::SortBy);
        assert_eq!(selection, FilterSelection::default());
    }

    #[test]
    fn test_sort_is_not_an_active_filter() {
        let mut selection = FilterSelection::default();
        selection.apply(FilterUpdate::SortBy(Some(SortOption::PriceAsc)));
        assert!(!selection.has_active_filters());
        assert_eq!(selection.sort(), SortOption::PriceAsc);
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!("priceRange".parse::<FilterField>().unwrap(), FilterField::PriceRange);
        assert_eq!("tags".parse::<SetField>().unwrap(), SetField::Tags);
        assert!(matches!(
            "in_stock".parse::<SetField>(),
            Err(CommerceError::NotASetField(_))
        ));
        assert!("colour".parse::<FilterField>().is_err());
    }

    #[test]
    fn test_parse_price_range() {
        assert_eq!("1000..5000".parse::<PriceRange>().unwrap(), PriceRange::new(1000, 5000));
        assert_eq!("1000..".parse::<PriceRange>().unwrap(), PriceRange::at_least(1000));
        assert_eq!("..5000".parse::<PriceRange>().unwrap(), PriceRange::at_most(5000));
        assert!("..".parse::<PriceRange>().is_err());
        assert!("cheap".parse::<PriceRange>().is_err());
    }
}
