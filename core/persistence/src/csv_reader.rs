//! FILENAME: core/persistence/src/csv_reader.rs

use crate::PersistenceError;
use dataset::{ColumnMap, Dataset};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header row plus string cells, before any typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads any CSV source into a raw table. Rows may be ragged; the dataset
/// loader pads short rows with missing values.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, PersistenceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(PersistenceError::InvalidFormat(
            "CSV file has no header row".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Reads a CSV source and validates it against the column map.
pub fn read_csv<R: Read>(reader: R, map: &ColumnMap) -> Result<Dataset, PersistenceError> {
    let table = read_table(reader)?;
    Ok(Dataset::load(&table.headers, table.rows, map)?)
}

pub fn load_csv(path: &Path, map: &ColumnMap) -> Result<Dataset, PersistenceError> {
    log::info!("loading dataset from {}", path.display());
    let file = File::open(path)?;
    read_csv(file, map)
}
