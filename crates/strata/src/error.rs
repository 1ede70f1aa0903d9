//! Error types for the Strata library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ColumnType;

/// Main error type for Strata operations.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Error reading, writing or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to summarise.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error: the inputs cannot be summarised as requested.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A column required by the schema or a variable is absent.
    #[error("Configuration error: required column '{column}' is missing")]
    MissingColumn { column: String },

    /// A value does not conform to its column's declared type.
    #[error(
        "Configuration error: row {row}, column '{column}': expected {expected}, found '{value}'"
    )]
    TypeMismatch {
        row: usize,
        column: String,
        expected: ColumnType,
        value: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrataError {
    /// Whether this error belongs to the configuration class (bad schema,
    /// bad variable list, bad stratification column).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StrataError::Configuration(_)
                | StrataError::MissingColumn { .. }
                | StrataError::TypeMismatch { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StrataError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Strata operations.
pub type Result<T> = std::result::Result<T, StrataError>;
