//! FILENAME: app/src/error.rs

use dataset::ColumnError;
use persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("{0}")]
    Column(#[from] ColumnError),

    #[error("Logging error: {0}")]
    Logging(String),
}
