//! FILENAME: core/persistence/src/lib.rs
//! Windscope Persistence Module
//!
//! Reads the wind-farm table from CSV and hands it to `Dataset::load`, which
//! owns schema validation.

mod csv_reader;
mod error;

pub use csv_reader::{load_csv, read_csv, read_table, RawTable};
pub use error::PersistenceError;
