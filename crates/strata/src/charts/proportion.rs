//! 100%-stacked proportions of a discrete outcome by tier.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::schema::Dataset;
use crate::summary::stratify;

/// One stacked segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub level: String,
    pub count: usize,
    /// Share of the bar, 0.0 to 1.0.
    pub proportion: f64,
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionBar {
    pub group: String,
    /// Number of non-missing outcomes in the group.
    pub n: usize,
    pub segments: Vec<Segment>,
}

impl ProportionBar {
    /// Proportion of the given level, if it is a segment of this bar.
    pub fn proportion(&self, level: &str) -> Option<f64> {
        self.segments
            .iter()
            .find(|s| s.level == level)
            .map(|s| s.proportion)
    }
}

/// Outcome proportions for each level of `group_column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionChart {
    pub group_column: String,
    pub outcome_column: String,
    /// Outcome levels, in stacking order.
    pub levels: Vec<String>,
    pub bars: Vec<ProportionBar>,
}

impl ProportionChart {
    /// Long format: one line per (group, level).
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["group", "n", "level", "count", "proportion"])?;
        for bar in &self.bars {
            for segment in &bar.segments {
                csv.write_record([
                    bar.group.clone(),
                    bar.n.to_string(),
                    segment.level.clone(),
                    segment.count.to_string(),
                    segment.proportion.to_string(),
                ])?;
            }
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Proportion data of `outcome_column` grouped by the tiers of `group_column`.
///
/// Rows with a missing tier or missing outcome are left out. A group without
/// outcomes keeps its bar with zero counts and zero proportions.
pub fn churn_proportions(
    dataset: &Dataset,
    group_column: &str,
    outcome_column: &str,
) -> Result<ProportionChart> {
    let column = dataset.require(outcome_column)?;
    if !column.column_type().is_discrete() {
        return Err(StrataError::Configuration(format!(
            "proportion column '{}' is {}, expected categorical or binary",
            outcome_column,
            column.column_type()
        )));
    }

    let levels = column.levels();
    let bars = stratify(dataset, group_column)?
        .into_iter()
        .map(|stratum| {
            let observed: Vec<&str> = stratum
                .rows
                .iter()
                .filter_map(|&r| column.level_at(r))
                .collect();
            let n = observed.len();
            let segments = levels
                .iter()
                .map(|level| {
                    let count = observed.iter().filter(|&&o| o == level).count();
                    Segment {
                        level: level.clone(),
                        count,
                        proportion: if n == 0 { 0.0 } else { count as f64 / n as f64 },
                    }
                })
                .collect();
            ProportionBar {
                group: stratum.name,
                n,
                segments,
            }
        })
        .collect();

    Ok(ProportionChart {
        group_column: group_column.to_string(),
        outcome_column: outcome_column.to_string(),
        levels: levels.into_owned(),
        bars,
    })
}
