//! Facet options for filter controls.

use serde::{Deserialize, Serialize};

use crate::search::{FacetCounts, FacetDistribution};

/// One selectable facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Human-readable label derived from the value.
    pub label: String,
    /// Raw facet value, used in the filter expression.
    pub value: String,
    pub count: u64,
}

impl FacetOption {
    /// Options for every value in `counts`, in the counts' order.
    pub fn from_counts(counts: &FacetCounts) -> Vec<FacetOption> {
        counts
            .iter()
            .map(|(value, count)| FacetOption {
                label: facet_label(value),
                value: value.to_string(),
                count: *count,
            })
            .collect()
    }

    /// Options for one facet field; empty when the field is absent.
    pub fn for_field(distribution: &FacetDistribution, field: &str) -> Vec<FacetOption> {
        distribution
            .get(field)
            .map(FacetOption::from_counts)
            .unwrap_or_default()
    }
}

/// Turn a facet value into a label: `_` and `-` become spaces and the first
/// letter of every word is upper-cased (`new_arrival` → `New Arrival`).
pub fn facet_label(value: &str) -> String {
    let mut label = String::with_capacity(value.len());
    let mut prev_is_word = false;
    for c in value.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        let is_word = c.is_alphanumeric();
        if is_word && !prev_is_word {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
        prev_is_word = is_word;
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(facet_label("new_arrival"), "New Arrival");
        assert_eq!(facet_label("best-seller"), "Best Seller");
        assert_eq!(facet_label("shoes"), "Shoes");
        assert_eq!(facet_label("usd"), "Usd");
        assert_eq!(facet_label("already Fine"), "Already Fine");
        assert_eq!(facet_label(""), "");
    }

    #[test]
    fn test_options_keep_mapping_order() {
        let distribution: FacetDistribution = serde_json::from_str(
            r#"{"tags.value": {"new_arrival": 3, "best-seller": 1}}"#,
        )
        .unwrap();

        let options = FacetOption::for_field(&distribution, "tags.value");
        assert_eq!(
            options,
            vec![
                FacetOption {
                    label: "New Arrival".to_string(),
                    value: "new_arrival".to_string(),
                    count: 3,
                },
                FacetOption {
                    label: "Best Seller".to_string(),
                    value: "best-seller".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_absent_field_is_empty() {
        let distribution = FacetDistribution::new();
        assert!(FacetOption::for_field(&distribution, "tags.value").is_empty());
    }
}
