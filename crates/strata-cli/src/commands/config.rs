//! Config command - print the effective configuration.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use super::load_config;
use crate::cli::GroupingArgs;

pub fn run(output: Option<PathBuf>, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config, GroupingArgs::default())?;
    let json = serde_json::to_string_pretty(&config)?;

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
