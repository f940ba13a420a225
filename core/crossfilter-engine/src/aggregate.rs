//! FILENAME: core/crossfilter-engine/src/aggregate.rs
//! Aggregation Engine - Derives every chart figure from a Filtered View.
//!
//! Layers:
//! - `summarize`: scalar totals for the indicator cards
//! - `group_by`: per-category sums/counts for the donut breakdowns
//! - `bucket_by_year`: sparse commissioning series for the line chart
//!
//! Counts are always recomputed from the filtered rows; no precomputed
//! count column is trusted. Missing numbers contribute 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use dataset::{CategoricalColumn, NumericColumn};

use crate::view::FilteredView;

/// Megawatts per gigawatt, for the installed-capacity card.
pub const MW_PER_GW: f64 = 1000.0;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for grouped breakdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Aggregation {
    #[default]
    Sum,
    Count,
}

/// Running state for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    pub count: u64,
}

impl Accumulator {
    /// Adds one row; a missing value still counts the row but adds nothing.
    pub fn add(&mut self, value: Option<f64>) {
        self.count += 1;
        if let Some(v) = value {
            self.sum += v;
        }
    }

    pub fn compute(&self, aggregation: Aggregation) -> f64 {
        match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Count => self.count as f64,
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Scalar totals over the filtered rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub count: usize,
    #[serde(rename = "totalCapacityGW")]
    pub total_capacity_gw: f64,
    pub total_turbines: u64,
}

/// One group of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEntry {
    pub key: String,
    pub value: f64,
}

/// Grouped breakdown. Entries are ordered ascending by key (byte-wise,
/// case-sensitive) so repeated renders of the same data line up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub group_column: CategoricalColumn,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_column: Option<NumericColumn>,
    pub aggregation: Aggregation,
    pub entries: Vec<AggregateEntry>,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Binary search, valid because entries are sorted by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .binary_search_by(|e| e.key.as_str().cmp(key))
            .ok()
            .map(|i| self.entries[i].value)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }
}

/// Wind farms that came online in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBucket {
    pub year: i32,
    pub count: usize,
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Row count, installed capacity in GW and installed turbines.
pub fn summarize(view: &FilteredView) -> Summary {
    let mut capacity_mw = 0.0;
    let mut turbines: u64 = 0;
    for record in view.iter() {
        capacity_mw += record.capacity_mw.unwrap_or(0.0);
        turbines += u64::from(record.turbine_count.unwrap_or(0));
    }
    Summary {
        count: view.len(),
        total_capacity_gw: capacity_mw / MW_PER_GW,
        total_turbines: turbines,
    }
}

/// Groups the filtered rows by `group_column`. Rows without a key are
/// dropped; only keys present in the view appear.
///
/// `value_column` is read for `Sum` and ignored for `Count`.
pub fn group_by(
    view: &FilteredView,
    group_column: CategoricalColumn,
    value_column: Option<NumericColumn>,
    aggregation: Aggregation,
) -> AggregateResult {
    let mut groups: FxHashMap<&str, Accumulator> = FxHashMap::default();

    for record in view.iter() {
        let Some(key) = record.text(group_column) else {
            continue;
        };
        let value = value_column.and_then(|c| record.number(c));
        groups.entry(key).or_default().add(value);
    }

    let mut entries: Vec<AggregateEntry> = groups
        .into_iter()
        .map(|(key, acc)| AggregateEntry { key: key.to_string(), value: acc.compute(aggregation) })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    AggregateResult {
        group_column,
        value_column: match aggregation {
            Aggregation::Sum => value_column,
            Aggregation::Count => None,
        },
        aggregation,
        entries,
    }
}

/// Commissioning counts per year, ascending. Years without rows are absent
/// rather than zero, and rows without a year are skipped.
pub fn bucket_by_year(view: &FilteredView) -> Vec<YearBucket> {
    let mut counts: FxHashMap<i32, usize> = FxHashMap::default();
    for year in view.iter().filter_map(|r| r.year_online) {
        *counts.entry(year).or_insert(0) += 1;
    }

    let mut buckets: Vec<YearBucket> = counts
        .into_iter()
        .map(|(year, count)| YearBucket { year, count })
        .collect();
    buckets.sort_by_key(|b| b.year);
    buckets
}
