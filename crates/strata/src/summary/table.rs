//! The formatted row table produced by the builder.

use serde::{Deserialize, Serialize};

/// Header of the label column.
pub const LABEL_HEADER: &str = "Characteristic";

/// One group column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupColumn {
    /// Group name (a tier level, or the overall label).
    pub name: String,
    /// Number of rows in the group.
    pub n: usize,
}

impl GroupColumn {
    /// Column header, e.g. `Basic, N = 30`.
    pub fn header(&self) -> String {
        format!("{}, N = {}", self.name, self.n)
    }
}

/// What a summary row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Variable header with blank values (categorical variables).
    Header,
    /// One level of a categorical variable.
    Level,
    /// The single statistic row of a binary or continuous variable.
    Statistic,
    /// Missing-value counts for a variable.
    Missing,
}

/// A single line of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub kind: RowKind,
    /// One formatted value per group column, in column order.
    pub values: Vec<String>,
}

/// Ordered table of formatted rows, one value column per group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowTable {
    pub groups: Vec<GroupColumn>,
    pub rows: Vec<SummaryRow>,
}

impl RowTable {
    /// Header line: label header followed by one header per group.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(LABEL_HEADER.to_string())
            .chain(self.groups.iter().map(GroupColumn::header))
            .collect()
    }

    /// First row with the given label.
    pub fn row(&self, label: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Formatted value at (`label`, `group`).
    pub fn value(&self, label: &str, group: &str) -> Option<&str> {
        let index = self.groups.iter().position(|g| g.name == group)?;
        self.row(label)?.values.get(index).map(String::as_str)
    }

    /// Group column by name.
    pub fn group(&self, name: &str) -> Option<&GroupColumn> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Each row as label followed by its values.
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> {
        self.rows.iter().map(|row| {
            std::iter::once(row.label.as_str())
                .chain(row.values.iter().map(String::as_str))
                .collect()
        })
    }
}
