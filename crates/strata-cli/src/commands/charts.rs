//! Charts command - export the data behind the two summary charts.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use colored::Colorize;
use strata::{BOXPLOT_STEM, PROPORTION_STEM, Reporter};

use super::{load_config, require_file};
use crate::cli::GroupingArgs;

pub fn run(
    file: PathBuf,
    output_dir: PathBuf,
    config: Option<&Path>,
    grouping: GroupingArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;

    let reporter = Reporter::with_config(load_config(config, grouping)?);
    let (dataset, _source) = reporter.load(&file)?;
    let charts = reporter.charts(&dataset)?;

    fs::create_dir_all(&output_dir)?;

    let boxplot_path = output_dir.join(format!("{}.json", BOXPLOT_STEM));
    fs::write(&boxplot_path, serde_json::to_string_pretty(&charts.boxplot)?)?;
    charts
        .boxplot
        .write_csv(File::create(output_dir.join(format!("{}.csv", BOXPLOT_STEM)))?)?;

    let proportion_path = output_dir.join(format!("{}.json", PROPORTION_STEM));
    fs::write(&proportion_path, serde_json::to_string_pretty(&charts.proportions)?)?;
    charts
        .proportions
        .write_csv(File::create(output_dir.join(format!("{}.csv", PROPORTION_STEM)))?)?;

    println!(
        "{} {}",
        "Boxplot data".cyan().bold(),
        boxplot_path.display().to_string().white()
    );
    for series in &charts.boxplot.series {
        match &series.stats {
            Some(stats) => println!(
                "  {:12} n={:<5} median {:.1}  IQR {:.1}-{:.1}",
                series.group, series.n, stats.median, stats.q1, stats.q3
            ),
            None => println!("  {:12} n=0", series.group),
        }
    }

    println!(
        "{} {}",
        "Proportion data".cyan().bold(),
        proportion_path.display().to_string().white()
    );
    for bar in &charts.proportions.bars {
        let shares: Vec<String> = bar
            .segments
            .iter()
            .map(|s| format!("{} {:.0}%", s.level, s.proportion * 100.0))
            .collect();
        println!("  {:12} n={:<5} {}", bar.group, bar.n, shares.join(", "));
    }

    Ok(())
}
