//! Chart data for the two summary charts.
//!
//! Drawing is left to the caller; these types carry the numbers a plotting
//! tool needs and serialize to JSON or CSV.

mod boxplot;
mod proportion;

pub use boxplot::{BoxStats, BoxplotChart, BoxplotSeries, nps_boxplot};
pub use proportion::{ProportionBar, ProportionChart, Segment, churn_proportions};
