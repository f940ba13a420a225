//! FILENAME: core/crossfilter-engine/src/filter.rs
//! Filter State - The user's current selection as a plain value.
//!
//! This module contains all the types needed to DESCRIBE what the user
//! is looking at. These structures are designed to be:
//! - Serializable (echoed back to adapters with every snapshot)
//! - Immutable (every interaction produces a new state)
//! - Cheap to compare (for last-write-wins checks)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use dataset::{CategoricalColumn, Dataset, Record};

use crate::options;

// ============================================================================
// SELECTION
// ============================================================================

/// Which values of the grouping column are selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "values")]
pub enum Selection {
    /// No categorical predicate.
    #[default]
    All,
    /// Single-select dropdown value.
    One(String),
    /// Multi-select. An empty set matches nothing.
    Many(BTreeSet<String>),
}

impl Selection {
    /// Builds a selection from raw dropdown values: none clears the filter,
    /// one value is a single select, several values become a set.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut set: BTreeSet<String> = values.into_iter().collect();
        match set.len() {
            0 => Selection::All,
            1 => match set.pop_first() {
                Some(value) => Selection::One(value),
                None => Selection::All,
            },
            _ => Selection::Many(set),
        }
    }

    /// Tests one row's grouping value. A missing value never matches an
    /// active selection.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::One(selected) => value == Some(selected.as_str()),
            Selection::Many(selected) => value.is_some_and(|v| selected.contains(v)),
        }
    }

    /// Selected values in ascending order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Selection::All => Vec::new(),
            Selection::One(value) => vec![value.as_str()],
            Selection::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

// ============================================================================
// YEAR RANGE
// ============================================================================

/// Inclusive bound on the year a wind farm came online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Bounds given in the wrong order are swapped.
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            YearRange { min, max }
        } else {
            YearRange { min: max, max: min }
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

// ============================================================================
// FILTER STATE
// ============================================================================

/// Complete filter input for one recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub grouping_column: CategoricalColumn,
    pub selection: Selection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
}

impl FilterState {
    /// A state that lets every row through.
    pub fn all(grouping_column: CategoricalColumn) -> Self {
        FilterState { grouping_column, selection: Selection::All, year_range: None }
    }

    /// Initial state: the grouping column with its default value selected.
    pub fn initial(
        dataset: &Dataset,
        grouping_column: CategoricalColumn,
        fallback: Option<&str>,
    ) -> Self {
        FilterState {
            grouping_column,
            selection: options::reset_selection(dataset, grouping_column, fallback),
            year_range: None,
        }
    }

    pub fn with_selection(&self, selection: Selection) -> Self {
        FilterState { selection, ..self.clone() }
    }

    pub fn with_year_range(&self, year_range: Option<YearRange>) -> Self {
        FilterState { year_range, ..self.clone() }
    }

    /// AND of every active predicate for one record.
    pub fn matches(&self, record: &Record) -> bool {
        if !self.selection.matches(record.text(self.grouping_column)) {
            return false;
        }
        match self.year_range {
            Some(range) => record.year_online.is_some_and(|y| range.contains(y)),
            None => true,
        }
    }

    /// Produces the state that follows an event. Changing the grouping column
    /// always resets the selection to the new column's default, and selections
    /// naming values outside the current domain are repaired the same way.
    pub fn apply_event(
        &self,
        dataset: &Dataset,
        event: &FilterEvent,
        fallback: Option<&str>,
    ) -> FilterState {
        match event {
            FilterEvent::GroupingColumnChanged(column) => FilterState {
                grouping_column: *column,
                selection: options::reset_selection(dataset, *column, fallback),
                year_range: self.year_range,
            },
            FilterEvent::SelectionChanged(values) => {
                let next = self.with_selection(Selection::from_values(values.iter().cloned()));
                options::revalidate(dataset, &next, fallback)
            }
            FilterEvent::YearRangeChanged { min, max } => {
                self.with_year_range(Some(YearRange::new(*min, *max)))
            }
            FilterEvent::YearRangeCleared => self.with_year_range(None),
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Filter-change events raised by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterEvent {
    GroupingColumnChanged(CategoricalColumn),
    /// Raw dropdown values. Empty clears the categorical filter.
    SelectionChanged(SmallVec<[String; 4]>),
    YearRangeChanged { min: i32, max: i32 },
    YearRangeCleared,
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn record(country: Option<&str>, year: Option<i32>) -> Record {
        Record {
            country: country.map(str::to_string),
            year_online: year,
            ..Record::new("farm")
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record { operator: Some("RWE".to_string()), ..record(Some("England"), Some(2005)) },
            Record { operator: Some("SSE".to_string()), ..record(Some("Scotland"), Some(2012)) },
            record(Some("Wales"), None),
        ])
    }

    #[test]
    fn test_selection_from_values() {
        assert_eq!(Selection::from_values(Vec::new()), Selection::All);
        assert_eq!(
            Selection::from_values(vec!["Wales".to_string(), "Wales".to_string()]),
            Selection::One("Wales".to_string())
        );
        let many = Selection::from_values(vec!["Wales".to_string(), "England".to_string()]);
        assert_eq!(many.values(), vec!["England", "Wales"]);
    }

    #[test]
    fn test_selection_never_matches_missing() {
        assert!(Selection::All.matches(None));
        assert!(!Selection::One("England".to_string()).matches(None));
        assert!(!Selection::Many(BTreeSet::new()).matches(Some("England")));
    }

    #[test]
    fn test_year_range_swaps_and_is_inclusive() {
        let range = YearRange::new(2010, 2000);
        assert_eq!((range.min(), range.max()), (2000, 2010));
        assert!(range.contains(2000));
        assert!(range.contains(2010));
        assert!(!range.contains(2011));
    }

    #[test]
    fn test_matches_combines_predicates() {
        let state = FilterState {
            grouping_column: CategoricalColumn::Country,
            selection: Selection::One("England".to_string()),
            year_range: Some(YearRange::new(2000, 2010)),
        };
        assert!(state.matches(&record(Some("England"), Some(2005))));
        assert!(!state.matches(&record(Some("England"), Some(2015))));
        assert!(!state.matches(&record(Some("England"), None)));
        assert!(!state.matches(&record(Some("Wales"), Some(2005))));
        assert!(!state.matches(&record(None, Some(2005))));
    }

    #[test]
    fn test_grouping_change_resets_selection() {
        let dataset = dataset();
        let state = FilterState::initial(&dataset, CategoricalColumn::Country, Some("England"));
        assert_eq!(state.selection, Selection::One("England".to_string()));

        let next = state.apply_event(
            &dataset,
            &FilterEvent::GroupingColumnChanged(CategoricalColumn::Operator),
            Some("England"),
        );
        assert_eq!(next.grouping_column, CategoricalColumn::Operator);
        assert_eq!(next.selection, Selection::One("RWE".to_string()));
    }

    #[test]
    fn test_stale_selection_is_repaired() {
        let dataset = dataset();
        let state = FilterState::initial(&dataset, CategoricalColumn::Country, None);
        let next = state.apply_event(
            &dataset,
            &FilterEvent::SelectionChanged(smallvec!["Atlantis".to_string()]),
            Some("Wales"),
        );
        assert_eq!(next.selection, Selection::One("Wales".to_string()));
    }

    #[test]
    fn test_year_events() {
        let dataset = dataset();
        let state = FilterState::all(CategoricalColumn::Country);
        let event = FilterEvent::YearRangeChanged { min: 2010, max: 2001 };
        let ranged = state.apply_event(&dataset, &event, None);
        assert_eq!(ranged.year_range, Some(YearRange::new(2001, 2010)));
        let cleared = ranged.apply_event(&dataset, &FilterEvent::YearRangeCleared, None);
        assert_eq!(cleared, state);
    }
}
