//! FILENAME: core/dataset/src/column.rs
//! PURPOSE: Column roles and the declarative role-to-header mapping.
//! CONTEXT: The dashboard variants only differ in header names, so the header
//! text lives in a `ColumnMap` table while the engine works with roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColumnError;

// ============================================================================
// COLUMN ROLES
// ============================================================================

/// Every column role a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Developer,
    Operator,
    Owner,
    TurbineManufacturer,
    TurbineModel,
    Country,
    Region,
    State,
    YearOnline,
    Latitude,
    Longitude,
    CapacityMw,
    TurbineCount,
    PowerPerTurbineMw,
}

impl Column {
    pub const ALL: [Column; 15] = [
        Column::Name,
        Column::Developer,
        Column::Operator,
        Column::Owner,
        Column::TurbineManufacturer,
        Column::TurbineModel,
        Column::Country,
        Column::Region,
        Column::State,
        Column::YearOnline,
        Column::Latitude,
        Column::Longitude,
        Column::CapacityMw,
        Column::TurbineCount,
        Column::PowerPerTurbineMw,
    ];

    /// Canonical snake_case identifier, also used in config files and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Developer => "developer",
            Column::Operator => "operator",
            Column::Owner => "owner",
            Column::TurbineManufacturer => "turbine_manufacturer",
            Column::TurbineModel => "turbine_model",
            Column::Country => "country",
            Column::Region => "region",
            Column::State => "state",
            Column::YearOnline => "year_online",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::CapacityMw => "capacity_mw",
            Column::TurbineCount => "turbine_count",
            Column::PowerPerTurbineMw => "power_per_turbine_mw",
        }
    }

    /// The categorical view of this role, if it is one.
    pub fn as_categorical(&self) -> Option<CategoricalColumn> {
        CategoricalColumn::ALL.iter().copied().find(|c| c.column() == *self)
    }

    /// The numeric view of this role, if it is one.
    pub fn as_numeric(&self) -> Option<NumericColumn> {
        NumericColumn::ALL.iter().copied().find(|c| c.column() == *self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ColumnError::UnknownColumn(s.to_string()))
    }
}

/// The enumerated set of columns a user may group and filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    Name,
    Developer,
    Operator,
    Owner,
    TurbineManufacturer,
    TurbineModel,
    Country,
    Region,
    State,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 9] = [
        CategoricalColumn::Name,
        CategoricalColumn::Developer,
        CategoricalColumn::Operator,
        CategoricalColumn::Owner,
        CategoricalColumn::TurbineManufacturer,
        CategoricalColumn::TurbineModel,
        CategoricalColumn::Country,
        CategoricalColumn::Region,
        CategoricalColumn::State,
    ];

    pub fn column(&self) -> Column {
        match self {
            CategoricalColumn::Name => Column::Name,
            CategoricalColumn::Developer => Column::Developer,
            CategoricalColumn::Operator => Column::Operator,
            CategoricalColumn::Owner => Column::Owner,
            CategoricalColumn::TurbineManufacturer => Column::TurbineManufacturer,
            CategoricalColumn::TurbineModel => Column::TurbineModel,
            CategoricalColumn::Country => Column::Country,
            CategoricalColumn::Region => Column::Region,
            CategoricalColumn::State => Column::State,
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().as_str())
    }
}

impl FromStr for CategoricalColumn {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Column>()
            .ok()
            .and_then(|c| c.as_categorical())
            .ok_or_else(|| ColumnError::InvalidGroupingColumn(s.to_string()))
    }
}

/// Columns that hold numbers and can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    YearOnline,
    Latitude,
    Longitude,
    CapacityMw,
    TurbineCount,
    PowerPerTurbineMw,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 6] = [
        NumericColumn::YearOnline,
        NumericColumn::Latitude,
        NumericColumn::Longitude,
        NumericColumn::CapacityMw,
        NumericColumn::TurbineCount,
        NumericColumn::PowerPerTurbineMw,
    ];

    pub fn column(&self) -> Column {
        match self {
            NumericColumn::YearOnline => Column::YearOnline,
            NumericColumn::Latitude => Column::Latitude,
            NumericColumn::Longitude => Column::Longitude,
            NumericColumn::CapacityMw => Column::CapacityMw,
            NumericColumn::TurbineCount => Column::TurbineCount,
            NumericColumn::PowerPerTurbineMw => Column::PowerPerTurbineMw,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().as_str())
    }
}

impl FromStr for NumericColumn {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Column>()
            .ok()
            .and_then(|c| c.as_numeric())
            .ok_or_else(|| ColumnError::InvalidValueColumn(s.to_string()))
    }
}

// ============================================================================
// COLUMN MAP
// ============================================================================

/// Binds a role to the header text used by one source file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBinding {
    pub role: Column,
    pub header: String,
    /// Optional roles load as missing when the header is absent.
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl ColumnBinding {
    pub fn required(role: Column, header: &str) -> Self {
        ColumnBinding { role, header: header.to_string(), required: true }
    }

    pub fn optional(role: Column, header: &str) -> Self {
        ColumnBinding { role, header: header.to_string(), required: false }
    }
}

/// Role-to-header table. Defaults to the headers of the UK onshore wind farm export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMap {
    bindings: Vec<ColumnBinding>,
}

impl ColumnMap {
    pub fn new(bindings: Vec<ColumnBinding>) -> Self {
        ColumnMap { bindings }
    }

    pub fn bindings(&self) -> &[ColumnBinding] {
        &self.bindings
    }

    /// Finds the binding for a role. Roles absent from the map are treated as optional.
    pub fn binding(&self, role: Column) -> Option<&ColumnBinding> {
        self.bindings.iter().find(|b| b.role == role)
    }

    /// Overrides (or adds) the binding for one role.
    pub fn with_binding(mut self, binding: ColumnBinding) -> Self {
        match self.bindings.iter_mut().find(|b| b.role == binding.role) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
        self
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap::new(vec![
            ColumnBinding::required(Column::Name, "Wind farm"),
            ColumnBinding::required(Column::Developer, "Developer"),
            ColumnBinding::required(Column::Operator, "Operator"),
            ColumnBinding::required(Column::Owner, "Owner"),
            ColumnBinding::required(Column::TurbineManufacturer, "turbine_manufacturer"),
            ColumnBinding::optional(Column::TurbineModel, "turbine_model"),
            ColumnBinding::required(Column::Country, "country"),
            ColumnBinding::optional(Column::Region, "region"),
            ColumnBinding::required(Column::State, "state"),
            ColumnBinding::required(Column::YearOnline, "Online"),
            ColumnBinding::required(Column::Latitude, "lat"),
            ColumnBinding::required(Column::Longitude, "long"),
            ColumnBinding::required(Column::CapacityMw, "Cap. (MW)"),
            ColumnBinding::required(Column::TurbineCount, "No."),
            ColumnBinding::required(Column::PowerPerTurbineMw, "Power per turbine (MW)"),
        ])
    }
}
