//! Boxplot statistics of a numeric column by tier.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::schema::Dataset;
use crate::summary::{Quartiles, stratify};

/// Whiskers reach the most extreme value within this many IQRs of the box.
const WHISKER_IQR: f64 = 1.5;

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn of(values: &[f64]) -> Option<Self> {
        let Quartiles { q1, median, q3 } = Quartiles::of(values)?;
        let reach = WHISKER_IQR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let within = |v: &f64| (low_fence..=high_fence).contains(v);
        let lower_whisker = sorted.iter().copied().find(within).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(within).unwrap_or(q3);
        let outliers = sorted.iter().copied().filter(|v| !within(v)).collect();

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// One box of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotSeries {
    pub group: String,
    /// Number of non-missing values plotted.
    pub n: usize,
    /// Absent when the group has no values.
    pub stats: Option<BoxStats>,
}

/// Distribution of `value_column` for each level of `group_column`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotChart {
    pub group_column: String,
    pub value_column: String,
    pub series: Vec<BoxplotSeries>,
}

impl BoxplotChart {
    /// Write one line per group; outliers are `;`-separated.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "group",
            "n",
            "lower_whisker",
            "q1",
            "median",
            "q3",
            "upper_whisker",
            "outliers",
        ])?;
        for series in &self.series {
            let mut record = vec![series.group.clone(), series.n.to_string()];
            match &series.stats {
                Some(s) => {
                    record.extend(
                        [s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker]
                            .iter()
                            .map(f64::to_string),
                    );
                    record.push(
                        s.outliers
                            .iter()
                            .map(f64::to_string)
                            .collect::<Vec<_>>()
                            .join(";"),
                    );
                }
                None => record.extend(std::iter::repeat_n(String::new(), 6)),
            }
            csv.write_record(&record)?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Boxplot data of `value_column` grouped by the tiers of `group_column`.
///
/// Rows with a missing tier or missing value are left out.
pub fn nps_boxplot(
    dataset: &Dataset,
    group_column: &str,
    value_column: &str,
) -> Result<BoxplotChart> {
    let column = dataset.require(value_column)?;
    if !column.column_type().is_numeric() {
        return Err(StrataError::Configuration(format!(
            "boxplot column '{}' is {}, expected a number",
            value_column,
            column.column_type()
        )));
    }

    let series = stratify(dataset, group_column)?
        .into_iter()
        .map(|stratum| {
            let values: Vec<f64> = stratum
                .rows
                .iter()
                .filter_map(|&r| column.number_at(r))
                .collect();
            BoxplotSeries {
                group: stratum.name,
                n: values.len(),
                stats: BoxStats::of(&values),
            }
        })
        .collect();

    Ok(BoxplotChart {
        group_column: group_column.to_string(),
        value_column: value_column.to_string(),
        series,
    })
}
