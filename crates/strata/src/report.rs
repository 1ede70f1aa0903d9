//! Report pipeline: load, validate, summarise, chart, export.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::charts::{BoxplotChart, ProportionChart, churn_proportions, nps_boxplot};
use crate::error::{Result, StrataError};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::render::{TableFormat, render};
use crate::schema::{Dataset, DatasetSchema};
use crate::summary::{RowTable, VariableSpec, build_table, default_variables};

/// File stem of the exported summary table.
pub const TABLE_STEM: &str = "summary_table";
/// File stem of the exported NPS boxplot data.
pub const BOXPLOT_STEM: &str = "nps_boxplot";
/// File stem of the exported churn proportion data.
pub const PROPORTION_STEM: &str = "churn_rate";
/// Name of the manifest listing source and outputs.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Configuration for a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Declared dataset schema.
    pub schema: DatasetSchema,
    /// Stratification column.
    pub group_column: String,
    /// Label of the all-rows column.
    pub overall_label: String,
    /// Variables reported in the summary table, in order.
    pub variables: Vec<VariableSpec>,
    /// Numeric column drawn as a boxplot per tier.
    pub score_column: String,
    /// Discrete column drawn as stacked proportions per tier.
    pub outcome_column: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            schema: DatasetSchema::customer_subscriptions(),
            group_column: "plan_type".to_string(),
            overall_label: "Overall".to_string(),
            variables: default_variables(),
            score_column: "nps_score".to_string(),
            outcome_column: "churned_90d".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration from a JSON file; absent fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| StrataError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| StrataError::io(path, e))
    }
}

/// Data behind the two summary charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    /// Score distribution by tier.
    pub boxplot: BoxplotChart,
    /// Outcome proportions by tier.
    pub proportions: ProportionChart,
}

/// Result of a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The stratified summary table.
    pub table: RowTable,
    /// Chart data.
    pub charts: ChartSet,
}

/// Record of a report written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub source: SourceMetadata,
    /// Files written, relative to the output directory.
    pub outputs: Vec<String>,
}

impl Report {
    /// Write the table in each requested format, the chart data as JSON and
    /// CSV, and a manifest. Creates `dir` if needed.
    pub fn write_to(&self, dir: impl AsRef<Path>, formats: &[TableFormat]) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| StrataError::io(dir, e))?;

        let mut outputs = Vec::new();
        for &format in formats {
            let name = format!("{}.{}", TABLE_STEM, format.extension());
            write_file(dir, &name, render(&self.table, format)?.as_bytes())?;
            outputs.push(name);
        }

        let charts: [(&str, Vec<u8>, Vec<u8>); 2] = [
            (
                BOXPLOT_STEM,
                serde_json::to_vec_pretty(&self.charts.boxplot)?,
                csv_bytes(|w| self.charts.boxplot.write_csv(w))?,
            ),
            (
                PROPORTION_STEM,
                serde_json::to_vec_pretty(&self.charts.proportions)?,
                csv_bytes(|w| self.charts.proportions.write_csv(w))?,
            ),
        ];
        for (stem, json, csv) in charts {
            let json_name = format!("{}.json", stem);
            write_file(dir, &json_name, &json)?;
            outputs.push(json_name);
            let csv_name = format!("{}.csv", stem);
            write_file(dir, &csv_name, &csv)?;
            outputs.push(csv_name);
        }

        let manifest = Manifest {
            source: self.source.clone(),
            outputs: outputs.clone(),
        };
        write_file(dir, MANIFEST_FILE, &serde_json::to_vec_pretty(&manifest)?)?;
        outputs.push(MANIFEST_FILE.to_string());

        info!("wrote {} files to {}", outputs.len(), dir.display());
        Ok(outputs.into_iter().map(|name| dir.join(name)).collect())
    }
}

fn csv_bytes(write: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf)?;
    Ok(buf)
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|e| StrataError::io(&path, e))
}

/// Runs the reporting workflow.
pub struct Reporter {
    config: ReportConfig,
    parser: Parser,
}

impl Reporter {
    /// Create a reporter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create a reporter with custom configuration.
    pub fn with_config(config: ReportConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load and type a data file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let (table, source) = self.parser.parse_file(path)?;
        let dataset = self.config.schema.validate(&table)?;
        Ok((dataset, source))
    }

    /// Type an already parsed table.
    pub fn load_table(&self, table: &DataTable) -> Result<Dataset> {
        self.config.schema.validate(table)
    }

    /// Build the configured summary table.
    pub fn table(&self, dataset: &Dataset) -> Result<RowTable> {
        build_table(
            dataset,
            &self.config.group_column,
            &self.config.overall_label,
            &self.config.variables,
        )
    }

    /// Build the configured chart data.
    pub fn charts(&self, dataset: &Dataset) -> Result<ChartSet> {
        Ok(ChartSet {
            boxplot: nps_boxplot(dataset, &self.config.group_column, &self.config.score_column)?,
            proportions: churn_proportions(
                dataset,
                &self.config.group_column,
                &self.config.outcome_column,
            )?,
        })
    }

    /// Run the whole workflow on a data file.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<Report> {
        let path = path.as_ref();
        let (dataset, source) = self.load(path)?;
        debug!(
            "loaded {} ({} rows, {} columns)",
            source.file,
            dataset.row_count(),
            dataset.column_count()
        );

        let table = self.table(&dataset)?;
        let charts = self.charts(&dataset)?;

        Ok(Report {
            source,
            table,
            charts,
        })
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
