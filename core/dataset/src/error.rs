//! FILENAME: core/dataset/src/error.rs

use thiserror::Error;

use crate::column::Column;

/// Raised once at load time when the source table does not have the shape
/// the column map requires. Fatal for startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Required column '{header}' for role {role} is missing")]
    MissingColumn { role: Column, header: String },
}

/// Raised at the boundary when a column identifier coming from the UI does
/// not name one of the enumerated roles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Invalid grouping column: {0}")]
    InvalidGroupingColumn(String),

    #[error("Invalid value column: {0}")]
    InvalidValueColumn(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}
