//! Strata: stratified descriptive-statistics tables for tabular datasets.
//!
//! Strata reads a customer-subscription dataset, types it against an explicit
//! schema, and summarises a fixed list of variables once per plan tier and
//! once overall. It also produces the data behind two summary charts: the NPS
//! distribution by tier and the churn rate by tier.
//!
//! # Core Principles
//!
//! - **Explicit schema**: every core column has a declared type, checked on load
//! - **Missing data is reported, not dropped**: `(Missing)` rows and `-` placeholders
//! - **Pure summaries**: the input dataset is never modified
//!
//! # Example
//!
//! ```no_run
//! use strata::{Reporter, TableFormat, render};
//!
//! let reporter = Reporter::new();
//! let report = reporter.run("customers.csv").unwrap();
//!
//! println!("{}", render(&report.table, TableFormat::Text).unwrap());
//! report.write_to("output", &TableFormat::ALL).unwrap();
//! ```

pub mod charts;
pub mod error;
pub mod input;
pub mod render;
pub mod schema;
pub mod summary;

mod report;

pub use crate::report::{
    ChartSet, MANIFEST_FILE, Manifest, Report, ReportConfig, Reporter, BOXPLOT_STEM,
    PROPORTION_STEM, TABLE_STEM,
};
pub use error::{Result, StrataError};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use render::{TableFormat, render};
pub use schema::{Column, ColumnSpec, ColumnType, Dataset, DatasetSchema, Value};
pub use summary::{RowKind, RowTable, SummaryRow, VariableSpec, build_table, default_variables};
