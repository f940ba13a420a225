//! FILENAME: core/dataset/src/dataset.rs
//! PURPOSE: The immutable record table every recomputation reads from.
//! CONTEXT: Built once at startup from raw string rows. No mutation API is
//! exposed after load, so one instance can be shared across sessions.

use std::collections::{BTreeSet, HashMap};

use crate::column::{CategoricalColumn, Column, ColumnMap};
use crate::error::SchemaError;
use crate::record::{FieldValue, Record};

// ============================================================================
// DATASET
// ============================================================================

/// Ordered, read-only sequence of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wraps already-typed records (used by tests and in-memory sources).
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Builds the dataset from a header row and raw string rows.
    ///
    /// Fails only when a required role has no matching header. Blank cells
    /// load as missing. Numeric cells that do not parse (or are negative
    /// where only non-negative values make sense) also load as missing and are
    /// reported through `log::warn!`.
    pub fn load<I>(headers: &[String], rows: I, map: &ColumnMap) -> Result<Dataset, SchemaError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let layout = resolve_layout(headers, map)?;
        let mut rejected: HashMap<Column, usize> = HashMap::new();
        let mut records = Vec::new();

        for (row_index, row) in rows.into_iter().enumerate() {
            let mut cells =
                RowCells { row: &row, layout: &layout, row_index, rejected: &mut rejected };
            let record = Record {
                name: cells.text(Column::Name).unwrap_or_default(),
                developer: cells.text(Column::Developer),
                operator: cells.text(Column::Operator),
                owner: cells.text(Column::Owner),
                turbine_manufacturer: cells.text(Column::TurbineManufacturer),
                turbine_model: cells.text(Column::TurbineModel),
                country: cells.text(Column::Country),
                region: cells.text(Column::Region),
                state: cells.text(Column::State),
                year_online: cells.whole(Column::YearOnline),
                latitude: cells.number(Column::Latitude),
                longitude: cells.number(Column::Longitude),
                capacity_mw: cells.non_negative(Column::CapacityMw),
                turbine_count: cells.whole(Column::TurbineCount),
                power_per_turbine_mw: cells.non_negative(Column::PowerPerTurbineMw),
            };
            records.push(record);
        }

        for (column, count) in &rejected {
            log::warn!("{} unparseable value(s) in column {} loaded as missing", count, column);
        }
        log::info!("loaded {} records ({} columns mapped)", records.len(), layout.len());

        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-missing values of a categorical column, ascending and
    /// case-sensitive. Empty for an empty dataset.
    pub fn distinct_values(&self, column: CategoricalColumn) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.text(column))
            .map(str::to_string)
            .collect()
    }

    pub fn column(&self, column: Column) -> ColumnAccessor<'_> {
        ColumnAccessor { records: &self.records, column }
    }
}

// ============================================================================
// COLUMN ACCESSOR
// ============================================================================

/// Read-only access to one column across all rows.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAccessor<'a> {
    records: &'a [Record],
    column: Column,
}

impl<'a> ColumnAccessor<'a> {
    pub fn column(&self) -> Column {
        self.column
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value at a row; out-of-range rows read as missing.
    pub fn get(&self, row: usize) -> FieldValue<'a> {
        self.records.get(row).map_or(FieldValue::Missing, |r| r.get(self.column))
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldValue<'a>> + 'a {
        let column = self.column;
        self.records.iter().map(move |r| r.get(column))
    }
}

// ============================================================================
// LOAD HELPERS
// ============================================================================

/// Header position of every role found in the source.
type Layout = HashMap<Column, usize>;

fn resolve_layout(headers: &[String], map: &ColumnMap) -> Result<Layout, SchemaError> {
    let mut layout = Layout::new();
    for binding in map.bindings() {
        match headers.iter().position(|h| h.trim() == binding.header) {
            Some(index) => {
                layout.insert(binding.role, index);
            }
            None if binding.required => {
                return Err(SchemaError::MissingColumn {
                    role: binding.role,
                    header: binding.header.clone(),
                });
            }
            None => log::debug!("optional column '{}' not present", binding.header),
        }
    }
    Ok(layout)
}

struct RowCells<'a> {
    row: &'a [String],
    layout: &'a Layout,
    row_index: usize,
    rejected: &'a mut HashMap<Column, usize>,
}

impl RowCells<'_> {
    fn raw(&self, column: Column) -> Option<&str> {
        let index = *self.layout.get(&column)?;
        let cell = self.row.get(index)?.trim();
        if cell.is_empty() { None } else { Some(cell) }
    }

    fn reject(&mut self, column: Column, cell: &str) {
        log::debug!("row {}: cannot read '{}' as {}", self.row_index, cell, column);
        *self.rejected.entry(column).or_insert(0) += 1;
    }

    fn text(&self, column: Column) -> Option<String> {
        self.raw(column).map(str::to_string)
    }

    fn number(&mut self, column: Column) -> Option<f64> {
        let cell = self.raw(column)?.to_string();
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            // Spreadsheet exports spell missing numbers as "nan".
            Ok(_) => None,
            Err(_) => {
                self.reject(column, &cell);
                None
            }
        }
    }

    fn non_negative(&mut self, column: Column) -> Option<f64> {
        let n = self.number(column)?;
        if n < 0.0 {
            self.reject(column, &n.to_string());
            return None;
        }
        Some(n)
    }

    /// Integral value, accepting "2009" as well as the float form "2009.0".
    /// Values that do not fit the target type are rejected like any other
    /// unreadable cell.
    fn whole<T: TryFrom<i64>>(&mut self, column: Column) -> Option<T> {
        let n = self.non_negative(column)?;
        if n.fract() != 0.0 {
            self.reject(column, &n.to_string());
            return None;
        }
        match T::try_from(n as i64) {
            Ok(value) => Some(value),
            Err(_) => {
                self.reject(column, &n.to_string());
                None
            }
        }
    }
}
