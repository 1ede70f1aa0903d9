//! Report command - run the whole workflow and write every output.

use std::path::{Path, PathBuf};

use colored::Colorize;
use strata::{Reporter, TableFormat, render};

use super::{load_config, require_file};
use crate::cli::GroupingArgs;

pub fn run(
    file: PathBuf,
    output_dir: PathBuf,
    config: Option<&Path>,
    grouping: GroupingArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    println!(
        "{} {}",
        "Summarising".cyan().bold(),
        file.display().to_string().white()
    );

    let reporter = Reporter::with_config(load_config(config, grouping)?);
    let report = reporter.run(&file)?;

    let groups: Vec<String> = report.table.groups.iter().map(|g| g.header()).collect();
    println!(
        "Loaded {} rows; groups: {}",
        report.source.row_count.to_string().white().bold(),
        groups.join(" | ")
    );

    if verbose {
        println!();
        print!("{}", render(&report.table, TableFormat::Text)?);
        println!();
    }

    let written = report.write_to(&output_dir, &TableFormat::ALL)?;

    println!(
        "{} {} files to {}",
        "Wrote".green().bold(),
        written.len().to_string().white().bold(),
        output_dir.display().to_string().white()
    );
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}
