//! Strata CLI - stratified summary reporting.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Table {
            file,
            format,
            output,
            grouping,
        } => commands::table::run(file, format, output, config, grouping),

        Commands::Charts {
            file,
            output_dir,
            grouping,
        } => commands::charts::run(file, output_dir, config, grouping),

        Commands::Report {
            file,
            output_dir,
            grouping,
        } => commands::report::run(file, output_dir, config, grouping, cli.verbose),

        Commands::Schema { file, json } => commands::schema::run(file, json, config),

        Commands::Config { output } => commands::config::run(output, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
