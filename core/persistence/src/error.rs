//! FILENAME: core/persistence/src/error.rs

use dataset::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}
