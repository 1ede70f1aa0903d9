//! Typed, validated in-memory dataset.

use std::borrow::Cow;
use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::types::{ColumnType, NEGATIVE_LEVEL, POSITIVE_LEVEL, Value};
use crate::error::{Result, StrataError};

/// A typed column of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    declared_levels: Option<Vec<String>>,
    values: Vec<Value>,
}

impl Column {
    /// Create a column from already-typed values.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            declared_levels: None,
            values,
        }
    }

    /// Attach a declared level order.
    pub fn with_levels(mut self, levels: Vec<String>) -> Self {
        self.declared_levels = Some(levels);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Number of missing cells in the whole column.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Level order of a discrete column.
    ///
    /// Declared levels win; binary columns use `No`, `Yes`; otherwise the
    /// distinct observed labels in sorted order.
    pub fn levels(&self) -> Cow<'_, [String]> {
        if let Some(levels) = &self.declared_levels {
            return Cow::Borrowed(levels);
        }
        if self.column_type == ColumnType::Binary {
            return Cow::Owned(vec![NEGATIVE_LEVEL.to_string(), POSITIVE_LEVEL.to_string()]);
        }
        Cow::Owned(
            self.values
                .iter()
                .filter_map(Value::as_level)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
        )
    }

    /// Whether the level set is fixed up front rather than read off the data.
    pub fn has_fixed_levels(&self) -> bool {
        self.declared_levels.is_some() || self.column_type == ColumnType::Binary
    }

    /// Level label at a row, if the cell is a non-missing discrete value.
    pub fn level_at(&self, row: usize) -> Option<&str> {
        self.values.get(row).and_then(Value::as_level)
    }

    /// Numeric value at a row, if the cell is a non-missing number.
    pub fn number_at(&self, row: usize) -> Option<f64> {
        self.values.get(row).and_then(Value::as_f64)
    }
}

/// A table of typed columns sharing one row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Dataset {
    /// Create an empty dataset expecting `row_count` rows per column.
    pub fn new(row_count: usize) -> Self {
        Self {
            columns: IndexMap::new(),
            row_count,
        }
    }

    /// Add a column, replacing any column with the same name.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if column.len() != self.row_count {
            return Err(StrataError::Configuration(format!(
                "column '{}' has {} values, expected {}",
                column.name(),
                column.len(),
                self.row_count
            )));
        }
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Builder-style [`Dataset::push_column`].
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get a column or fail with [`StrataError::MissingColumn`].
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| StrataError::MissingColumn {
            column: name.to_string(),
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<Value> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    Value::Missing
                } else {
                    Value::Text(v.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_observed_levels_are_sorted() {
        let column = Column::new(
            "region",
            ColumnType::Categorical,
            text(&["South", "North", "", "North", "East"]),
        );
        assert_eq!(column.levels().to_vec(), vec!["East", "North", "South"]);
        assert_eq!(column.missing_count(), 1);
    }

    #[test]
    fn test_declared_levels_win() {
        let column = Column::new("plan", ColumnType::Categorical, text(&["Premium"]))
            .with_levels(vec!["Basic".into(), "Standard".into(), "Premium".into()]);
        assert_eq!(column.levels().to_vec(), vec!["Basic", "Standard", "Premium"]);
    }

    #[test]
    fn test_binary_levels() {
        let column = Column::new("churned", ColumnType::Binary, vec![Value::Flag(true)]);
        assert_eq!(column.levels().to_vec(), vec!["No", "Yes"]);
        assert_eq!(column.level_at(0), Some("Yes"));
    }

    #[test]
    fn test_push_column_checks_length() {
        let mut dataset = Dataset::new(2);
        let column = Column::new("x", ColumnType::Integer, vec![Value::Integer(1)]);
        assert!(dataset.push_column(column).is_err());
    }

    #[test]
    fn test_require_missing_column() {
        let dataset = Dataset::new(0);
        let err = dataset.require("nps_score").unwrap_err();
        assert!(err.is_configuration_error());
    }
}
