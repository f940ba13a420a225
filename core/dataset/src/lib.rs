//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Dataset Store for the wind-farm dashboard.
//! CONTEXT: Leaf crate. Owns the record type, the column roles, the
//! role-to-header map and the immutable `Dataset`. Every other crate reads
//! through these types.

pub mod column;
pub mod dataset;
pub mod error;
pub mod record;

pub use column::{CategoricalColumn, Column, ColumnBinding, ColumnMap, NumericColumn};
pub use dataset::{ColumnAccessor, Dataset};
pub use error::{ColumnError, SchemaError};
pub use record::{FieldValue, Record};
