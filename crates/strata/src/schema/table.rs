//! Table-level schema and validation of raw tables into typed datasets.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::column::ColumnSpec;
use super::dataset::{Column, Dataset};
use super::types::{ColumnType, Value};
use crate::error::{Result, StrataError};
use crate::input::DataTable;

/// Explicit schema for a dataset: declared columns in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Declared columns.
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    /// Create a schema with the given columns.
    pub fn with_columns(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    /// The core schema of the customer-subscription dataset.
    pub fn customer_subscriptions() -> Self {
        Self::with_columns(vec![
            ColumnSpec::string("customer_id"),
            ColumnSpec::date("signup_date"),
            ColumnSpec::categorical("region"),
            ColumnSpec::categorical("plan_type").with_levels(["Basic", "Standard", "Premium"]),
            ColumnSpec::integer("tenure_months"),
            ColumnSpec::numeric("monthly_fee_gbp"),
            ColumnSpec::integer("support_tickets_90d"),
            ColumnSpec::integer("last_login_days"),
            ColumnSpec::integer("nps_score"),
            ColumnSpec::binary("churned_90d"),
        ])
    }

    /// Get a column declaration by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all declared column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Type every declared column of `table`.
    ///
    /// Fails on the first absent required column or non-conforming value.
    /// Undeclared columns are carried as [`ColumnType::String`].
    pub fn validate(&self, table: &DataTable) -> Result<Dataset> {
        let mut dataset = Dataset::new(table.row_count());

        for spec in &self.columns {
            let Some(index) = table.column_index(&spec.name) else {
                if spec.required {
                    return Err(StrataError::MissingColumn {
                        column: spec.name.clone(),
                    });
                }
                debug!("optional column '{}' not present", spec.name);
                continue;
            };
            dataset.push_column(type_column(table, index, spec)?)?;
        }

        for (index, header) in table.headers.iter().enumerate() {
            if self.get_column(header).is_some() || dataset.column(header).is_some() {
                continue;
            }
            let spec = ColumnSpec::string(header.clone());
            dataset.push_column(type_column(table, index, &spec)?)?;
        }

        debug!(
            "validated {} rows against {} declared columns ({} total)",
            dataset.row_count(),
            self.columns.len(),
            dataset.column_count()
        );
        Ok(dataset)
    }
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self::customer_subscriptions()
    }
}

fn type_column(table: &DataTable, index: usize, spec: &ColumnSpec) -> Result<Column> {
    let mut values = Vec::with_capacity(table.row_count());
    let mut undeclared = 0usize;

    for (row, raw) in table.column_values(index).enumerate() {
        if DataTable::is_null_value(raw) {
            values.push(Value::Missing);
            continue;
        }
        let value = spec
            .column_type
            .parse(raw)
            .ok_or_else(|| StrataError::TypeMismatch {
                row: row + 1,
                column: spec.name.clone(),
                expected: spec.column_type,
                value: raw.to_string(),
            })?;

        match (&spec.levels, &value) {
            (Some(levels), Value::Text(label)) if !levels.iter().any(|l| l == label) => {
                undeclared += 1;
                values.push(Value::Missing);
            }
            _ => values.push(value),
        }
    }

    if undeclared > 0 {
        warn!(
            "column '{}': {} value(s) outside the declared levels treated as missing",
            spec.name, undeclared
        );
    }

    let mut column = Column::new(spec.name.clone(), spec.column_type, values);
    if let (ColumnType::Categorical, Some(levels)) = (spec.column_type, &spec.levels) {
        column = column.with_levels(levels.clone());
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn table(content: &str) -> DataTable {
        Parser::new().parse_bytes(content.as_bytes()).unwrap()
    }

    fn small_schema() -> DatasetSchema {
        DatasetSchema::with_columns(vec![
            ColumnSpec::categorical("plan_type").with_levels(["Basic", "Premium"]),
            ColumnSpec::integer("nps_score"),
            ColumnSpec::binary("churned_90d"),
        ])
    }

    #[test]
    fn test_validate_types_columns() {
        let data = table("plan_type,nps_score,churned_90d\nBasic,7,0\nPremium,NA,1\n");
        let dataset = small_schema().validate(&data).unwrap();

        assert_eq!(dataset.row_count(), 2);
        let nps = dataset.column("nps_score").unwrap();
        assert_eq!(nps.value(0), Some(&Value::Integer(7)));
        assert_eq!(nps.missing_count(), 1);
        assert_eq!(dataset.column("churned_90d").unwrap().level_at(1), Some("Yes"));
    }

    #[test]
    fn test_missing_required_column() {
        let data = table("plan_type,nps_score\nBasic,7\n");
        let err = small_schema().validate(&data).unwrap_err();
        assert!(matches!(err, StrataError::MissingColumn { ref column } if column == "churned_90d"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_type_mismatch_reports_row() {
        let data = table("plan_type,nps_score,churned_90d\nBasic,7,0\nBasic,seven,0\n");
        let err = small_schema().validate(&data).unwrap_err();
        match err {
            StrataError::TypeMismatch { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "nps_score");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_undeclared_level_becomes_missing() {
        let data = table("plan_type,nps_score,churned_90d\nGold,7,0\nBasic,8,1\n");
        let dataset = small_schema().validate(&data).unwrap();
        let plan = dataset.column("plan_type").unwrap();
        assert_eq!(plan.missing_count(), 1);
        assert_eq!(plan.levels().to_vec(), vec!["Basic", "Premium"]);
    }

    #[test]
    fn test_extra_columns_kept_as_strings() {
        let data = table("plan_type,device_type,nps_score,churned_90d\nBasic,ios,7,0\n");
        let dataset = small_schema().validate(&data).unwrap();
        let device = dataset.column("device_type").unwrap();
        assert_eq!(device.column_type(), ColumnType::String);
    }

    #[test]
    fn test_optional_column_may_be_absent() {
        let schema = DatasetSchema::with_columns(vec![
            ColumnSpec::integer("nps_score"),
            ColumnSpec::numeric("revenue_last_3m_gbp").optional(),
        ]);
        let dataset = schema.validate(&table("nps_score\n5\n")).unwrap();
        assert!(dataset.column("revenue_last_3m_gbp").is_none());
    }

    #[test]
    fn test_core_schema_declares_plan_order() {
        let schema = DatasetSchema::customer_subscriptions();
        let plan = schema.get_column("plan_type").unwrap();
        assert_eq!(
            plan.levels.as_deref(),
            Some(&["Basic".to_string(), "Standard".to_string(), "Premium".to_string()][..])
        );
        assert_eq!(schema.columns.len(), 10);
    }
}
