//! Variable specifications: which columns the summary table reports, and how.

use serde::{Deserialize, Serialize};

use crate::schema::POSITIVE_LEVEL;

/// One variable of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableSpec {
    /// Reported as one `n (%)` row per level under a header row.
    Categorical { label: String, column: String },
    /// Reported as a single `n (%)` row for the positive level.
    Binary {
        label: String,
        column: String,
        #[serde(default = "default_positive")]
        positive: String,
    },
    /// Reported as `median (Q1, Q3)`.
    Continuous { label: String, column: String },
}

fn default_positive() -> String {
    POSITIVE_LEVEL.to_string()
}

impl VariableSpec {
    pub fn categorical(label: impl Into<String>, column: impl Into<String>) -> Self {
        VariableSpec::Categorical {
            label: label.into(),
            column: column.into(),
        }
    }

    /// Binary variable counting the `Yes` level.
    pub fn binary(label: impl Into<String>, column: impl Into<String>) -> Self {
        VariableSpec::Binary {
            label: label.into(),
            column: column.into(),
            positive: default_positive(),
        }
    }

    pub fn continuous(label: impl Into<String>, column: impl Into<String>) -> Self {
        VariableSpec::Continuous {
            label: label.into(),
            column: column.into(),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            VariableSpec::Categorical { label, .. }
            | VariableSpec::Binary { label, .. }
            | VariableSpec::Continuous { label, .. } => label,
        }
    }

    /// Source column name.
    pub fn column(&self) -> &str {
        match self {
            VariableSpec::Categorical { column, .. }
            | VariableSpec::Binary { column, .. }
            | VariableSpec::Continuous { column, .. } => column,
        }
    }

    /// Label of the variable's main row (or header row, for categoricals).
    pub fn row_label(&self) -> String {
        match self {
            VariableSpec::Categorical { label, .. } | VariableSpec::Binary { label, .. } => {
                format!("{}, n (%)", label)
            }
            VariableSpec::Continuous { label, .. } => format!("{}, median (IQR)", label),
        }
    }

    /// Label of the variable's missing-count row.
    pub fn missing_label(&self) -> String {
        format!("{} (Missing)", self.label())
    }
}

/// The variables reported for the customer-subscription dataset, in order.
pub fn default_variables() -> Vec<VariableSpec> {
    vec![
        VariableSpec::categorical("Region", "region"),
        VariableSpec::continuous("Tenure (months)", "tenure_months"),
        VariableSpec::continuous("Monthly fee (GBP)", "monthly_fee_gbp"),
        VariableSpec::continuous("Support tickets (90 days)", "support_tickets_90d"),
        VariableSpec::continuous("Days since last login", "last_login_days"),
        VariableSpec::continuous("NPS Score", "nps_score"),
        VariableSpec::binary("Churned within 90 days", "churned_90d"),
    ]
}
