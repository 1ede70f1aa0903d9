//! Explicit dataset schema and the typed dataset it produces.

mod column;
mod dataset;
mod table;
mod types;

pub use column::ColumnSpec;
pub use dataset::{Column, Dataset};
pub use table::DatasetSchema;
pub use types::{ColumnType, NEGATIVE_LEVEL, POSITIVE_LEVEL, Value};
