//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use strata::TableFormat;

/// Strata: stratified summary tables for subscription datasets
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file (schema, grouping, variables)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

/// Overrides applied on top of the configuration file.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct GroupingArgs {
    /// Stratification column (default: plan_type)
    #[arg(short, long)]
    pub group: Option<String>,

    /// Label of the all-rows column (default: Overall)
    #[arg(long)]
    pub overall: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the stratified summary table
    Table {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (text, markdown, csv, json)
        #[arg(short, long, default_value = "text")]
        format: TableFormat,

        /// Write the table here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grouping: GroupingArgs,
    },

    /// Export chart data (NPS boxplot, churn proportions)
    Charts {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for the chart files
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        #[command(flatten)]
        grouping: GroupingArgs,
    },

    /// Run the whole workflow: table in every format, charts, manifest
    Report {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for all outputs
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        #[command(flatten)]
        grouping: GroupingArgs,
    },

    /// Show the expected schema, or validate a data file against it
    Schema {
        /// Data file to validate
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
