//! FILENAME: core/crossfilter-engine/src/dashboard.rs
//! One full recomputation pass: Filter Engine -> Aggregation Engine + Sizing.
//!
//! The snapshot is everything the chart, map and table adapters need for one
//! filter state. It is built fresh for every state and never cached.

use serde::{Deserialize, Serialize};

use dataset::{CategoricalColumn, Dataset, NumericColumn};

use crate::aggregate::{
    bucket_by_year, group_by, summarize, AggregateResult, Aggregation, Summary, YearBucket,
};
use crate::filter::FilterState;
use crate::sizing::SizingPolicy;
use crate::view::{apply, CapacityBar, MapPoint};

// ============================================================================
// SETTINGS
// ============================================================================

/// Declarative description of one donut breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSpec {
    pub id: String,
    pub title: String,
    pub group_column: CategoricalColumn,
    #[serde(default)]
    pub value_column: Option<NumericColumn>,
    #[serde(default)]
    pub aggregation: Aggregation,
}

impl BreakdownSpec {
    pub fn new(
        id: &str,
        title: &str,
        group_column: CategoricalColumn,
        value_column: Option<NumericColumn>,
        aggregation: Aggregation,
    ) -> Self {
        BreakdownSpec {
            id: id.to_string(),
            title: title.to_string(),
            group_column,
            value_column,
            aggregation,
        }
    }
}

/// The three breakdowns of the onshore wind dashboard.
pub fn default_breakdowns() -> Vec<BreakdownSpec> {
    vec![
        BreakdownSpec::new(
            "capacityByCountry",
            "Cap. (MW) by country",
            CategoricalColumn::Country,
            Some(NumericColumn::CapacityMw),
            Aggregation::Sum,
        ),
        BreakdownSpec::new(
            "windFarmsByOperator",
            "Wind Farm count by Operator",
            CategoricalColumn::Operator,
            None,
            Aggregation::Count,
        ),
        BreakdownSpec::new(
            "turbinesByManufacturer",
            "Installed Turbines",
            CategoricalColumn::TurbineManufacturer,
            Some(NumericColumn::TurbineCount),
            Aggregation::Sum,
        ),
    ]
}

/// Everything `recompute` needs besides the dataset and the filter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub sizing: SizingPolicy,
    pub breakdowns: Vec<BreakdownSpec>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings { sizing: SizingPolicy::default(), breakdowns: default_breakdowns() }
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// A computed breakdown, labelled for the adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub id: String,
    pub title: String,
    pub result: AggregateResult,
}

/// Renderable output for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub state: FilterState,
    pub summary: Summary,
    pub map_points: Vec<MapPoint>,
    pub capacity_bars: Vec<CapacityBar>,
    pub breakdowns: Vec<Breakdown>,
    pub online_by_year: Vec<YearBucket>,
    /// Height hint for the capacity bar list, in pixels.
    pub list_height: u32,
}

impl DashboardSnapshot {
    pub fn breakdown(&self, id: &str) -> Option<&AggregateResult> {
        self.breakdowns.iter().find(|b| b.id == id).map(|b| &b.result)
    }
}

/// Runs the complete pass for one filter state.
pub fn recompute(
    dataset: &Dataset,
    state: &FilterState,
    settings: &DashboardSettings,
) -> DashboardSnapshot {
    let view = apply(dataset, state);

    let breakdowns = settings
        .breakdowns
        .iter()
        .map(|spec| Breakdown {
            id: spec.id.clone(),
            title: spec.title.clone(),
            result: group_by(&view, spec.group_column, spec.value_column, spec.aggregation),
        })
        .collect();

    let snapshot = DashboardSnapshot {
        state: state.clone(),
        summary: summarize(&view),
        map_points: view.map_points(),
        capacity_bars: view.capacity_bars(state.grouping_column),
        breakdowns,
        online_by_year: bucket_by_year(&view),
        list_height: settings.sizing.height_for(view.len()),
    };

    log::debug!(
        "recomputed: {} rows, {:.3} GW, {} turbines, height {}",
        snapshot.summary.count,
        snapshot.summary.total_capacity_gw,
        snapshot.summary.total_turbines,
        snapshot.list_height
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selection;
    use dataset::Record;

    fn farm(
        name: &str,
        country: &str,
        operator: &str,
        maker: &str,
        mw: f64,
        n: u32,
        year: i32,
    ) -> Record {
        Record {
            country: Some(country.to_string()),
            operator: Some(operator.to_string()),
            turbine_manufacturer: Some(maker.to_string()),
            capacity_mw: Some(mw),
            turbine_count: Some(n),
            year_online: Some(year),
            latitude: Some(54.0),
            longitude: Some(-2.0),
            ..Record::new(name)
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            farm("A", "England", "RWE", "Vestas", 20.0, 10, 2001),
            farm("B", "England", "EDF", "Siemens", 30.0, 12, 2003),
            farm("C", "England", "RWE", "Vestas", 40.0, 16, 2003),
            farm("D", "Scotland", "SSE", "Enercon", 100.0, 40, 2010),
            farm("E", "Scotland", "SSE", "Vestas", 50.0, 20, 2011),
        ])
    }

    #[test]
    fn test_recompute_england() {
        let dataset = dataset();
        let state = FilterState::all(CategoricalColumn::Country)
            .with_selection(Selection::One("England".to_string()));
        let snapshot = recompute(&dataset, &state, &DashboardSettings::default());

        assert_eq!(snapshot.summary.count, 3);
        assert!((snapshot.summary.total_capacity_gw - 0.09).abs() < 1e-12);
        assert_eq!(snapshot.map_points.len(), 3);
        assert_eq!(snapshot.capacity_bars.len(), 3);
        assert_eq!(snapshot.list_height, 300);

        let operators = snapshot.breakdown("windFarmsByOperator").unwrap();
        assert_eq!(operators.keys().collect::<Vec<_>>(), vec!["EDF", "RWE"]);
        assert_eq!(operators.get("RWE"), Some(2.0));

        let makers = snapshot.breakdown("turbinesByManufacturer").unwrap();
        assert_eq!(makers.get("Vestas"), Some(26.0));
        assert_eq!(snapshot.online_by_year, vec![
            YearBucket { year: 2001, count: 1 },
            YearBucket { year: 2003, count: 2 },
        ]);
    }

    #[test]
    fn test_recompute_with_no_matches() {
        let dataset = dataset();
        let state = FilterState::all(CategoricalColumn::Country)
            .with_selection(Selection::One("Wales".to_string()));
        let snapshot = recompute(&dataset, &state, &DashboardSettings::default());

        assert_eq!(snapshot.summary.count, 0);
        assert_eq!(snapshot.summary.total_capacity_gw, 0.0);
        assert!(snapshot.breakdowns.iter().all(|b| b.result.is_empty()));
        assert!(snapshot.online_by_year.is_empty());
        assert_eq!(snapshot.list_height, 800);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let dataset = dataset();
        let state = FilterState::all(CategoricalColumn::Country);
        let snapshot = recompute(&dataset, &state, &DashboardSettings::default());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["summary"]["count"], 5);
        assert!(json["summary"]["totalCapacityGW"].is_number());
        assert_eq!(json["state"]["groupingColumn"], "country");
        assert_eq!(json["state"]["selection"]["kind"], "all");
        assert_eq!(json["listHeight"], 500);
    }

    #[test]
    fn test_settings_from_json_defaults() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{"sizing": {"emptyHeight": 600}}"#).unwrap();
        assert_eq!(settings.sizing.empty_height, 600);
        assert_eq!(settings.sizing.per_row, 30);
        assert_eq!(settings.breakdowns, default_breakdowns());
    }
}
