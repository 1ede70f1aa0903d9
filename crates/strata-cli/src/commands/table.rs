//! Table command - build and print the stratified summary table.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use strata::{Reporter, TableFormat, render};

use super::{load_config, require_file};
use crate::cli::GroupingArgs;

pub fn run(
    file: PathBuf,
    format: TableFormat,
    output: Option<PathBuf>,
    config: Option<&Path>,
    grouping: GroupingArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    let reporter = Reporter::with_config(load_config(config, grouping)?);
    let (dataset, source) = reporter.load(&file)?;
    let table = reporter.table(&dataset)?;
    let rendered = render(&table, format)?;

    match output {
        Some(path) => {
            fs::write(&path, rendered)?;
            eprintln!(
                "{} {} rows from {} to {}",
                "Wrote".green().bold(),
                table.rows.len().to_string().white().bold(),
                source.file,
                path.display().to_string().white()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
