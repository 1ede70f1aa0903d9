//! Schema command - show the declared schema or validate a file against it.

use std::path::{Path, PathBuf};

use colored::Colorize;
use strata::{Parser, Reporter};

use super::{load_config, require_file};
use crate::cli::GroupingArgs;

pub fn run(
    file: Option<PathBuf>,
    json_output: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config, GroupingArgs::default())?;

    let Some(file) = file else {
        if json_output {
            println!("{}", serde_json::to_string_pretty(&config.schema)?);
        } else {
            println!("{}", "Declared columns:".yellow().bold());
            for column in &config.schema.columns {
                let levels = column
                    .levels
                    .as_ref()
                    .map(|l| format!(" [{}]", l.join(" < ")))
                    .unwrap_or_default();
                let optional = if column.required { "" } else { " (optional)" };
                println!(
                    "  {:24} {:12}{}{}",
                    column.name,
                    column.column_type.to_string(),
                    levels,
                    optional
                );
            }
        }
        return Ok(());
    };

    require_file(&file)?;
    let (table, source) = Parser::with_config(config.parser.clone()).parse_file(&file)?;
    let reporter = Reporter::with_config(config);
    let dataset = reporter.load_table(&table)?;

    let undeclared: Vec<&str> = table
        .headers
        .iter()
        .filter(|h| reporter.config().schema.get_column(h).is_none())
        .map(String::as_str)
        .collect();

    if json_output {
        let columns: Vec<_> = dataset
            .columns()
            .map(|c| {
                serde_json::json!({
                    "name": c.name(),
                    "type": c.column_type(),
                    "missing": c.missing_count(),
                })
            })
            .collect();
        let status = serde_json::json!({
            "file": source.file,
            "hash": source.hash,
            "format": source.format,
            "delimiter": table.delimiter_name(),
            "rows": dataset.row_count(),
            "columns": columns,
            "ignored_columns": undeclared,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {}, delimiter '{}')",
        "Valid".green().bold(),
        source.file.white(),
        dataset.row_count(),
        source.format,
        table.delimiter_name()
    );
    println!();
    for column in dataset.columns() {
        let missing = column.missing_count();
        let note = if missing > 0 {
            format!("{} missing", missing).yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:24} {:12} {}",
            column.name(),
            column.column_type().to_string(),
            note
        );
    }

    if !undeclared.is_empty() {
        println!();
        println!(
            "{} {}",
            "Ignored columns:".blue(),
            undeclared.join(", ")
        );
    }

    if dataset.row_count() == 0 {
        println!("{}", "Warning: file has no data rows".yellow());
    }

    Ok(())
}
