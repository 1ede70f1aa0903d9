//! Stratified summary table construction.

use std::collections::HashMap;

use log::debug;

use super::format::{format_count_percent, format_median_iqr};
use super::table::{GroupColumn, RowKind, RowTable, SummaryRow};
use super::variable::VariableSpec;
use crate::error::{Result, StrataError};
use crate::schema::{Column, ColumnType, Dataset};

/// A group of rows: one tier level, or the overall group.
#[derive(Debug, Clone)]
pub(crate) struct Stratum {
    pub name: String,
    pub rows: Vec<usize>,
}

/// Split the dataset by the levels of `group_column`.
///
/// Rows whose group value is missing belong to no named stratum.
pub(crate) fn stratify(dataset: &Dataset, group_column: &str) -> Result<Vec<Stratum>> {
    let column = dataset.require(group_column)?;
    if column.column_type() != ColumnType::Categorical {
        return Err(StrataError::Configuration(format!(
            "stratification column '{}' is {}, expected categorical",
            group_column,
            column.column_type()
        )));
    }

    let levels = column.levels();
    if levels.is_empty() {
        return Err(StrataError::Configuration(format!(
            "stratification column '{}' has no recognized levels",
            group_column
        )));
    }

    let mut strata: Vec<Stratum> = levels
        .iter()
        .map(|name| Stratum {
            name: name.clone(),
            rows: Vec::new(),
        })
        .collect();

    for row in 0..dataset.row_count() {
        let Some(level) = column.level_at(row) else {
            continue;
        };
        if let Some(stratum) = strata.iter_mut().find(|s| s.name == level) {
            stratum.rows.push(row);
        }
    }

    Ok(strata)
}

/// Build the stratified summary table.
///
/// Columns are the levels of `group_column` in order, then `overall_label`
/// covering every row. Rows follow `variables` in order.
pub fn build_table(
    dataset: &Dataset,
    group_column: &str,
    overall_label: &str,
    variables: &[VariableSpec],
) -> Result<RowTable> {
    let mut strata = stratify(dataset, group_column)?;
    if strata.iter().any(|s| s.name == overall_label) {
        return Err(StrataError::Configuration(format!(
            "overall label '{}' collides with a level of '{}'",
            overall_label, group_column
        )));
    }
    strata.push(Stratum {
        name: overall_label.to_string(),
        rows: (0..dataset.row_count()).collect(),
    });

    let columns = variables
        .iter()
        .map(|variable| resolve(dataset, variable))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = Vec::new();
    for (variable, column) in variables.iter().zip(columns) {
        match variable {
            VariableSpec::Categorical { .. } => {
                categorical_rows(&mut rows, variable, column, &strata)
            }
            VariableSpec::Binary { positive, .. } => {
                rows.push(binary_row(variable, column, positive, &strata))
            }
            VariableSpec::Continuous { .. } => {
                rows.push(continuous_row(variable, column, &strata))
            }
        }
        if column.missing_count() > 0 {
            rows.push(missing_row(variable, column, &strata));
        }
    }

    debug!(
        "built summary table: {} rows x {} groups",
        rows.len(),
        strata.len()
    );

    Ok(RowTable {
        groups: strata
            .iter()
            .map(|s| GroupColumn {
                name: s.name.clone(),
                n: s.rows.len(),
            })
            .collect(),
        rows,
    })
}

/// Look up a variable's column and check the kind fits the column type.
fn resolve<'a>(dataset: &'a Dataset, variable: &VariableSpec) -> Result<&'a Column> {
    let column = dataset.require(variable.column())?;
    let column_type = column.column_type();

    let fits = match variable {
        VariableSpec::Categorical { .. } | VariableSpec::Binary { .. } => column_type.is_discrete(),
        VariableSpec::Continuous { .. } => column_type.is_numeric(),
    };
    if !fits {
        return Err(StrataError::Configuration(format!(
            "variable '{}' cannot summarise {} column '{}'",
            variable.label(),
            column_type,
            column.name()
        )));
    }

    // an observed-only level set may simply lack the positive level
    if let VariableSpec::Binary { positive, .. } = variable {
        if column.has_fixed_levels() && !column.levels().iter().any(|l| l == positive) {
            return Err(StrataError::Configuration(format!(
                "variable '{}': '{}' is not a level of column '{}'",
                variable.label(),
                positive,
                column.name()
            )));
        }
    }

    Ok(column)
}

/// Level counts of a column within one stratum.
struct Tally<'a> {
    counts: HashMap<&'a str, usize>,
    non_missing: usize,
}

impl<'a> Tally<'a> {
    fn of(column: &'a Column, rows: &[usize]) -> Self {
        let mut counts = HashMap::new();
        let mut non_missing = 0;
        for &row in rows {
            if let Some(level) = column.level_at(row) {
                *counts.entry(level).or_insert(0) += 1;
                non_missing += 1;
            }
        }
        Self {
            counts,
            non_missing,
        }
    }

    fn count(&self, level: &str) -> usize {
        self.counts.get(level).copied().unwrap_or(0)
    }
}

fn categorical_rows(
    rows: &mut Vec<SummaryRow>,
    variable: &VariableSpec,
    column: &Column,
    strata: &[Stratum],
) {
    rows.push(SummaryRow {
        label: variable.row_label(),
        kind: RowKind::Header,
        values: vec![String::new(); strata.len()],
    });

    let tallies: Vec<Tally<'_>> = strata.iter().map(|s| Tally::of(column, &s.rows)).collect();
    for level in column.levels().iter() {
        rows.push(SummaryRow {
            label: format!("- {}", level),
            kind: RowKind::Level,
            values: tallies
                .iter()
                .map(|t| format_count_percent(t.count(level), t.non_missing))
                .collect(),
        });
    }
}

fn binary_row(
    variable: &VariableSpec,
    column: &Column,
    positive: &str,
    strata: &[Stratum],
) -> SummaryRow {
    SummaryRow {
        label: variable.row_label(),
        kind: RowKind::Statistic,
        values: strata
            .iter()
            .map(|s| {
                let tally = Tally::of(column, &s.rows);
                format_count_percent(tally.count(positive), tally.non_missing)
            })
            .collect(),
    }
}

fn continuous_row(variable: &VariableSpec, column: &Column, strata: &[Stratum]) -> SummaryRow {
    SummaryRow {
        label: variable.row_label(),
        kind: RowKind::Statistic,
        values: strata
            .iter()
            .map(|s| {
                let values: Vec<f64> = s.rows.iter().filter_map(|&r| column.number_at(r)).collect();
                format_median_iqr(&values)
            })
            .collect(),
    }
}

/// Missing counts over each group's total N.
fn missing_row(variable: &VariableSpec, column: &Column, strata: &[Stratum]) -> SummaryRow {
    SummaryRow {
        label: variable.missing_label(),
        kind: RowKind::Missing,
        values: strata
            .iter()
            .map(|s| {
                let missing = s
                    .rows
                    .iter()
                    .filter(|&&r| column.value(r).is_none_or(|v| v.is_missing()))
                    .count();
                format_count_percent(missing, s.rows.len())
            })
            .collect(),
    }
}
