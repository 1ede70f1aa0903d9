//! Stratified descriptive-statistics tables.
//!
//! [`build_table`] summarises a fixed list of variables once per level of a
//! stratification column and once overall. Categorical and binary variables
//! are reported as `n (%)` over the non-missing count of each group,
//! continuous variables as `median (Q1, Q3)`. A `(Missing)` row follows any
//! variable with at least one missing value in the dataset.

mod builder;
mod format;
mod table;
mod variable;

pub(crate) use builder::stratify;
pub use builder::build_table;
pub use format::{
    EMPTY_STATISTIC, Quartiles, format_count_percent, format_median_iqr, quantile,
    round_one_decimal, round_percent,
};
pub use table::{GroupColumn, LABEL_HEADER, RowKind, RowTable, SummaryRow};
pub use variable::{VariableSpec, default_variables};
