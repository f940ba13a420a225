//! FILENAME: core/crossfilter-engine/src/options.rs
//! Cascading Option Resolver.
//!
//! Category column -> value options -> selected value. Options are always
//! computed against the unfiltered dataset, and a change of category must
//! invalidate the dependent value selection.

use std::collections::BTreeSet;

use dataset::{CategoricalColumn, Dataset};

use crate::filter::{FilterState, Selection};

/// Sorted distinct values offered for a grouping column.
pub fn options_for(dataset: &Dataset, grouping_column: CategoricalColumn) -> Vec<String> {
    dataset.distinct_values(grouping_column).into_iter().collect()
}

/// The configured fallback if it is offered, else the first option.
pub fn default_value(options: &[String], fallback: Option<&str>) -> Option<String> {
    fallback
        .and_then(|f| options.iter().find(|o| o.as_str() == f))
        .or_else(|| options.first())
        .cloned()
}

/// Fresh selection for a newly chosen grouping column. An empty domain has
/// no value to select, so the categorical filter is lifted.
pub fn reset_selection(
    dataset: &Dataset,
    grouping_column: CategoricalColumn,
    fallback: Option<&str>,
) -> Selection {
    let options = options_for(dataset, grouping_column);
    match default_value(&options, fallback) {
        Some(value) => Selection::One(value),
        None => Selection::All,
    }
}

/// Drops selected values that are not in the grouping column's domain.
///
/// A single stale value is replaced by the default. A multi-select keeps its
/// in-domain values and falls back to the default when none survive.
pub fn revalidate(dataset: &Dataset, state: &FilterState, fallback: Option<&str>) -> FilterState {
    let domain = dataset.distinct_values(state.grouping_column);
    let selection = match &state.selection {
        Selection::All => Selection::All,
        Selection::One(value) if domain.contains(value) => Selection::One(value.clone()),
        Selection::Many(values) if values.is_empty() => Selection::Many(BTreeSet::new()),
        Selection::Many(values) => {
            let kept: BTreeSet<String> = values.intersection(&domain).cloned().collect();
            if kept.is_empty() {
                log::debug!("multi-select on {} fully stale, resetting", state.grouping_column);
                reset_selection(dataset, state.grouping_column, fallback)
            } else {
                Selection::Many(kept)
            }
        }
        Selection::One(value) => {
            log::debug!("stale selection '{}' on {}, resetting", value, state.grouping_column);
            reset_selection(dataset, state.grouping_column, fallback)
        }
    };
    state.with_selection(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::Record;

    fn dataset() -> Dataset {
        let farm = |country: &str, operator: &str| Record {
            country: Some(country.to_string()),
            operator: Some(operator.to_string()),
            ..Record::new("farm")
        };
        Dataset::from_records(vec![
            farm("Scotland", "SSE"),
            farm("England", "RWE"),
            farm("Wales", "RWE"),
            farm("England", "Orsted"),
        ])
    }

    #[test]
    fn test_options_are_sorted_and_distinct() {
        assert_eq!(
            options_for(&dataset(), CategoricalColumn::Country),
            vec!["England", "Scotland", "Wales"]
        );
        assert!(options_for(&dataset(), CategoricalColumn::Region).is_empty());
    }

    #[test]
    fn test_default_value_policy() {
        let options = vec!["England".to_string(), "Scotland".to_string()];
        assert_eq!(default_value(&options, Some("Scotland")), Some("Scotland".to_string()));
        assert_eq!(default_value(&options, Some("Wales")), Some("England".to_string()));
        assert_eq!(default_value(&options, None), Some("England".to_string()));
        assert_eq!(default_value(&[], Some("England")), None);
    }

    #[test]
    fn test_reset_on_empty_domain_lifts_filter() {
        assert_eq!(
            reset_selection(&dataset(), CategoricalColumn::Region, Some("England")),
            Selection::All
        );
    }

    #[test]
    fn test_revalidate_keeps_valid_values() {
        let dataset = dataset();
        let state = FilterState::all(CategoricalColumn::Operator)
            .with_selection(Selection::One("SSE".to_string()));
        assert_eq!(revalidate(&dataset, &state, None), state);
    }

    #[test]
    fn test_revalidate_prunes_multi_select() {
        let dataset = dataset();
        let values: BTreeSet<String> =
            ["RWE", "Vattenfall", "SSE"].iter().map(|s| s.to_string()).collect();
        let state =
            FilterState::all(CategoricalColumn::Operator).with_selection(Selection::Many(values));

        let repaired = revalidate(&dataset, &state, None);
        assert_eq!(repaired.selection.values(), vec!["RWE", "SSE"]);

        let stale: BTreeSet<String> = ["Vattenfall".to_string()].into_iter().collect();
        let state = state.with_selection(Selection::Many(stale));
        assert_eq!(
            revalidate(&dataset, &state, None).selection,
            Selection::One("Orsted".to_string())
        );
    }

    #[test]
    fn test_every_grouping_change_lands_in_domain() {
        let dataset = dataset();
        for column in CategoricalColumn::ALL {
            let domain = dataset.distinct_values(column);
            match reset_selection(&dataset, column, Some("England")) {
                Selection::One(value) => assert!(domain.contains(&value)),
                Selection::All => assert!(domain.is_empty()),
                Selection::Many(_) => panic!("reset never produces a multi-select"),
            }
        }
    }
}
