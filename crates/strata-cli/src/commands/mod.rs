//! CLI command implementations.

pub mod charts;
pub mod config;
pub mod report;
pub mod schema;
pub mod table;

use std::path::Path;

use strata::ReportConfig;

use crate::cli::GroupingArgs;

/// Load the configuration file if given, then apply command-line overrides.
pub fn load_config(
    path: Option<&Path>,
    grouping: GroupingArgs,
) -> Result<ReportConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            ReportConfig::load(path)?
        }
        None => ReportConfig::default(),
    };

    if let Some(group) = grouping.group {
        config.group_column = group;
    }
    if let Some(overall) = grouping.overall {
        config.overall_label = overall;
    }
    Ok(config)
}

/// Fail early with a readable message when the input file is absent.
pub fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
