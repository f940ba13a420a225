//! FILENAME: core/crossfilter-engine/src/view.rs
//! Filter Engine and the Filtered View it produces.
//!
//! The view stores the ascending source indices of the rows that pass the
//! filter and borrows the dataset for everything else. It is the single
//! source all aggregates are derived from.

use serde::Serialize;

use dataset::{CategoricalColumn, Dataset, Record};

use crate::filter::FilterState;

// ============================================================================
// FILTERED VIEW
// ============================================================================

/// Ordered subsequence of dataset rows matching a filter state.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Every row of the dataset.
    pub fn all(dataset: &'a Dataset) -> Self {
        FilteredView { dataset, indices: (0..dataset.len()).collect() }
    }

    /// Source row indices, strictly ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Rows that can be placed on the map (both coordinates present).
    pub fn map_points(&self) -> Vec<MapPoint> {
        self.iter()
            .filter_map(|record| {
                let (latitude, longitude) = record.coordinates()?;
                Some(MapPoint {
                    name: record.name.clone(),
                    latitude,
                    longitude,
                    capacity_mw: record.capacity_mw,
                    developer: record.developer.clone(),
                    operator: record.operator.clone(),
                    owner: record.owner.clone(),
                    year_online: record.year_online,
                    turbine_manufacturer: record.turbine_manufacturer.clone(),
                })
            })
            .collect()
    }

    /// One bar per row for the capacity-by-wind-farm list, coloured by
    /// `color_by`. Rows keep view order.
    pub fn capacity_bars(&self, color_by: CategoricalColumn) -> Vec<CapacityBar> {
        self.iter()
            .map(|record| CapacityBar {
                name: record.name.clone(),
                capacity_mw: record.capacity_mw.unwrap_or(0.0),
                color_key: record.text(color_by).map(str::to_string),
                developer: record.developer.clone(),
                operator: record.operator.clone(),
                owner: record.owner.clone(),
                turbine_manufacturer: record.turbine_manufacturer.clone(),
                turbine_count: record.turbine_count,
                power_per_turbine_mw: record.power_per_turbine_mw,
                year_online: record.year_online,
                turbine_model: record.turbine_model.clone(),
            })
            .collect()
    }
}

// ============================================================================
// ADAPTER ROWS
// ============================================================================

/// A located wind farm with its hover details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity_mw: Option<f64>,
    pub developer: Option<String>,
    pub operator: Option<String>,
    pub owner: Option<String>,
    pub year_online: Option<i32>,
    pub turbine_manufacturer: Option<String>,
}

/// A horizontal bar in the capacity list with its hover details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityBar {
    pub name: String,
    pub capacity_mw: f64,
    pub color_key: Option<String>,
    pub developer: Option<String>,
    pub operator: Option<String>,
    pub owner: Option<String>,
    pub turbine_manufacturer: Option<String>,
    pub turbine_count: Option<u32>,
    pub power_per_turbine_mw: Option<f64>,
    pub year_online: Option<i32>,
    pub turbine_model: Option<String>,
}

// ============================================================================
// FILTER ENGINE
// ============================================================================

/// Applies a filter state to the dataset. An empty result is a valid outcome.
pub fn apply<'a>(dataset: &'a Dataset, state: &FilterState) -> FilteredView<'a> {
    let indices: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter_map(|(i, record)| if state.matches(record) { Some(i) } else { None })
        .collect();

    log::debug!(
        "filter {}={:?} years={:?}: {} of {} rows",
        state.grouping_column,
        state.selection.values(),
        state.year_range.map(|r| (r.min(), r.max())),
        indices.len(),
        dataset.len()
    );

    FilteredView { dataset, indices }
}
