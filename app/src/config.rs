//! FILENAME: app/src/config.rs
// PURPOSE: Application configuration (column layout, default selection, chart settings).
// FORMAT: JSON, every field optional.

use std::path::Path;

use crossfilter_engine::DashboardSettings;
use dataset::{CategoricalColumn, ColumnBinding, ColumnMap};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Country selected on first render when the data has it.
pub const DEFAULT_FALLBACK_VALUE: &str = "England";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Bindings applied on top of the default header layout, for exports
    /// that rename columns.
    pub column_overrides: Vec<ColumnBinding>,
    /// Preferred initial value of the grouping dropdown.
    pub fallback_value: Option<String>,
    pub default_grouping_column: CategoricalColumn,
    pub dashboard: DashboardSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            column_overrides: Vec::new(),
            fallback_value: Some(DEFAULT_FALLBACK_VALUE.to_string()),
            default_grouping_column: CategoricalColumn::Country,
            dashboard: DashboardSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        crate::log_info!("CONFIG", "loaded {}", path.display());
        Ok(config)
    }

    /// Defaults for a missing path, the parsed file otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn column_map(&self) -> ColumnMap {
        self.column_overrides
            .iter()
            .cloned()
            .fold(ColumnMap::default(), ColumnMap::with_binding)
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::Column;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(AppConfig::from_json_str("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides_merge_into_default_map() {
        let config = AppConfig::from_json_str(
            r#"{
                "columnOverrides": [{"role": "country", "header": "Nation"}],
                "fallbackValue": "Scotland",
                "defaultGroupingColumn": "operator",
                "dashboard": {"sizing": {"emptyHeight": 640}}
            }"#,
        )
        .unwrap();

        let map = config.column_map();
        assert_eq!(map.binding(Column::Country).map(|b| b.header.as_str()), Some("Nation"));
        assert_eq!(map.binding(Column::Operator).map(|b| b.header.as_str()), Some("Operator"));
        assert_eq!(config.fallback(), Some("Scotland"));
        assert_eq!(config.default_grouping_column, CategoricalColumn::Operator);
        assert_eq!(config.dashboard.sizing.empty_height, 640);
        assert_eq!(config.dashboard.breakdowns.len(), 3);
    }

    #[test]
    fn test_unknown_grouping_column_is_rejected() {
        let err =
            AppConfig::from_json_str(r#"{"defaultGroupingColumn": "capacity_mw"}"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
