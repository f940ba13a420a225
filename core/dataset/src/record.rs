//! FILENAME: core/dataset/src/record.rs
//! PURPOSE: Defines one wind-farm entry and the borrowed value view over its fields.
//! CONTEXT: Source data is known to be inconsistent (capacity does not always
//! equal turbines x unit power, coordinates and years go missing), so every
//! field except the name is optional and nothing is cross-checked.

use serde::{Deserialize, Serialize};

use crate::column::{CategoricalColumn, Column, NumericColumn};

/// A single field as seen through a column accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

}

/// One wind-farm installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    pub developer: Option<String>,
    pub operator: Option<String>,
    pub owner: Option<String>,
    pub turbine_manufacturer: Option<String>,
    pub turbine_model: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub state: Option<String>,
    /// Absent for entries that are not commissioned yet.
    pub year_online: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity_mw: Option<f64>,
    pub turbine_count: Option<u32>,
    pub power_per_turbine_mw: Option<f64>,
}

impl Record {
    pub fn new(name: &str) -> Self {
        Record { name: name.to_string(), ..Record::default() }
    }

    /// Categorical value for a role; blank names count as missing too.
    pub fn text(&self, column: CategoricalColumn) -> Option<&str> {
        let value = match column {
            CategoricalColumn::Name => {
                return if self.name.is_empty() { None } else { Some(self.name.as_str()) };
            }
            CategoricalColumn::Developer => &self.developer,
            CategoricalColumn::Operator => &self.operator,
            CategoricalColumn::Owner => &self.owner,
            CategoricalColumn::TurbineManufacturer => &self.turbine_manufacturer,
            CategoricalColumn::TurbineModel => &self.turbine_model,
            CategoricalColumn::Country => &self.country,
            CategoricalColumn::Region => &self.region,
            CategoricalColumn::State => &self.state,
        };
        value.as_deref()
    }

    pub fn number(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::YearOnline => self.year_online.map(f64::from),
            NumericColumn::Latitude => self.latitude,
            NumericColumn::Longitude => self.longitude,
            NumericColumn::CapacityMw => self.capacity_mw,
            NumericColumn::TurbineCount => self.turbine_count.map(f64::from),
            NumericColumn::PowerPerTurbineMw => self.power_per_turbine_mw,
        }
    }

    pub fn get(&self, column: Column) -> FieldValue<'_> {
        if let Some(categorical) = column.as_categorical() {
            return self.text(categorical).map_or(FieldValue::Missing, FieldValue::Text);
        }
        column
            .as_numeric()
            .and_then(|numeric| self.number(numeric))
            .map_or(FieldValue::Missing, FieldValue::Number)
    }

    /// Both coordinates present, i.e. the row can be placed on a map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}
